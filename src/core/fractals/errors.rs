use std::error::Error;
use std::fmt;

use crate::core::palettes::errors::PaletteError;

/// A catalog record or engine setting that cannot produce a renderable fractal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    UnknownClass { name: String, class: String },
    MissingShader { name: String },
    UnknownPalette { name: String, palette: String },
    InvalidPaletteSize { name: String, source: PaletteError },
    DuplicateName { name: String },
    UnknownFractal { name: String },
    EmptyCatalog,
    ZeroMaxIterations,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass { name, class } => {
                write!(f, "fractal '{}' names unknown renderer class '{}'", name, class)
            }
            Self::MissingShader { name } => {
                write!(f, "shader fractal '{}' has no vertex/fragment source", name)
            }
            Self::UnknownPalette { name, palette } => {
                write!(f, "fractal '{}' names unknown palette '{}'", name, palette)
            }
            Self::InvalidPaletteSize { name, source } => {
                write!(f, "palette for fractal '{}' is invalid: {}", name, source)
            }
            Self::DuplicateName { name } => {
                write!(f, "a fractal named '{}' is already registered", name)
            }
            Self::UnknownFractal { name } => write!(f, "no fractal named '{}'", name),
            Self::EmptyCatalog => write!(f, "no fractal in the catalog could be built"),
            Self::ZeroMaxIterations => {
                write!(f, "maximum iterations must be greater than zero")
            }
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPaletteSize { source, .. } => Some(source),
            _ => None,
        }
    }
}
