use std::error::Error;
use std::fmt;
use std::io;

use crate::core::fractals::errors::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No completed render of `fractal` appeared within `attempts` checks.
    Unavailable { fractal: String, attempts: u32 },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { fractal, attempts } => write!(
                f,
                "no completed render of '{}' to export after {} attempts",
                fractal, attempts
            ),
        }
    }
}

impl Error for ExportError {}

/// Why an engine could not be started.
#[derive(Debug)]
pub enum EngineError {
    Configuration(ConfigurationError),
    WorkerUnavailable(io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(error) => write!(f, "{}", error),
            Self::WorkerUnavailable(error) => {
                write!(f, "could not start the render worker: {}", error)
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(error) => Some(error),
            Self::WorkerUnavailable(error) => Some(error),
        }
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }
}

impl From<io::Error> for EngineError {
    fn from(error: io::Error) -> Self {
        Self::WorkerUnavailable(error)
    }
}
