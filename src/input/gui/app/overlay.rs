use std::sync::Arc;
use std::time::Duration;

use crate::controllers::interactive::events::render::RenderEvent;
use crate::core::data::bitmap::Bitmap;

/// Something the overlay asked the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    CycleFractal(isize),
    SetParameter(String, f32),
}

/// What the overlay shows about the render stream.
#[derive(Debug, Default)]
pub struct OverlayState {
    pub rendering: Option<u64>,
    pub last_render_duration: Option<Duration>,
    pub last_error_message: Option<String>,
    presented_generation: u64,
}

impl OverlayState {
    /// Folds one event in. Returns the bitmap to put on screen, if the event
    /// carries one newer than what is showing.
    pub fn apply(&mut self, event: RenderEvent) -> Option<Arc<Bitmap>> {
        match event {
            RenderEvent::Started { generation, .. } => {
                self.rendering = Some(generation);
                None
            }
            RenderEvent::Frame(frame) => {
                self.finish(frame.generation);
                if frame.generation <= self.presented_generation {
                    return None;
                }
                self.presented_generation = frame.generation;
                self.last_render_duration = Some(frame.render_duration);
                self.last_error_message = None;
                Some(frame.bitmap)
            }
            RenderEvent::Error(error) => {
                self.finish(error.generation);
                if error.generation >= self.presented_generation {
                    self.last_error_message = Some(error.to_string());
                }
                None
            }
        }
    }

    #[must_use]
    pub fn presented_generation(&self) -> u64 {
        self.presented_generation
    }

    fn finish(&mut self, generation: u64) {
        if self.rendering == Some(generation) {
            self.rendering = None;
        }
    }
}
