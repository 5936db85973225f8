use std::error::Error;
use std::fmt;

/// A render that failed for a reason other than being superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub generation: u64,
    pub fractal: String,
    pub message: String,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "render {} of '{}' failed: {}",
            self.generation, self.fractal, self.message
        )
    }
}

impl Error for RenderError {}
