use std::error::Error;
use std::fmt;

use crate::core::actions::cancellation::Cancelled;
use crate::core::data::pixel_buffer::PixelBufferError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// No adapter or device could be obtained.
    Unavailable(String),
    /// The device or surface went away; re-initialising may recover it.
    Lost,
    ShaderCompilation(String),
    Readback(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "rendering surface unavailable: {}", reason),
            Self::Lost => write!(f, "rendering surface lost"),
            Self::ShaderCompilation(message) => write!(f, "shader compilation failed: {}", message),
            Self::Readback(message) => write!(f, "pixel readback failed: {}", message),
        }
    }
}

impl Error for SurfaceError {}

#[derive(Debug)]
pub enum GpuRenderError {
    Cancelled(Cancelled),
    Surface(SurfaceError),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GpuRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::Surface(err) => write!(f, "{}", err),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GpuRenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::Surface(err) => Some(err),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<Cancelled> for GpuRenderError {
    fn from(c: Cancelled) -> Self {
        Self::Cancelled(c)
    }
}

impl From<SurfaceError> for GpuRenderError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<PixelBufferError> for GpuRenderError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}
