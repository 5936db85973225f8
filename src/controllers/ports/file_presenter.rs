use std::path::Path;

use crate::core::data::bitmap::Bitmap;

/// Where exported bitmaps go.
pub trait FilePresenterPort {
    fn present(&self, bitmap: &Bitmap, filepath: &Path) -> std::io::Result<()>;
}
