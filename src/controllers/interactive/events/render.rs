use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render::RenderError;

#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// The worker picked up a request.
    Started { generation: u64, fractal: String },
    Frame(FrameData),
    Error(RenderError),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation, .. } => *generation,
            Self::Frame(frame) => frame.generation,
            Self::Error(error) => error.generation,
        }
    }
}
