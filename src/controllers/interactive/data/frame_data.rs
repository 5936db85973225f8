use std::sync::Arc;
use std::time::Duration;

use crate::core::data::bitmap::Bitmap;

#[derive(Debug, Clone)]
pub struct FrameData {
    pub generation: u64,
    pub bitmap: Arc<Bitmap>,
    pub render_duration: Duration,
}

impl FrameData {
    #[must_use]
    pub fn elapsed_millis(&self) -> u128 {
        self.render_duration.as_millis()
    }
}
