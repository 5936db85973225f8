pub mod errors;
pub mod escape_time;
pub mod fractal;
pub mod strategy;

pub use fractal::Fractal;
pub use strategy::{RenderStrategy, ShaderSource, StrategyKind};
