use std::path::Path;

use log::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::bitmap::Bitmap;
use crate::storage::write_ppm::write_ppm;

#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, bitmap: &Bitmap, filepath: &Path) -> std::io::Result<()> {
        if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        write_ppm(bitmap, filepath)?;
        info!(
            "saved '{}' ({}x{}) to {}",
            bitmap.fractal(),
            bitmap.width(),
            bitmap.height(),
            filepath.display()
        );
        Ok(())
    }
}
