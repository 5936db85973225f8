//! The engine context: registry, current fractal, cache, gestures and the
//! render scheduler for one view, owned together and passed down explicitly.

pub mod errors;
pub mod fractal_engine;

pub use errors::{EngineError, ExportError};
pub use fractal_engine::FractalEngine;
