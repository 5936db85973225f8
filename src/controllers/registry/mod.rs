//! Catalog processing: records from the loader become selectable fractals.

pub mod builtin_catalog;
pub mod factory;
pub mod fractal_record;
pub mod fractal_registry;

pub use builtin_catalog::builtin_catalog;
pub use factory::{FractalConstructor, FractalFactory};
pub use fractal_record::FractalRecord;
pub use fractal_registry::{FractalRegistry, RejectedRecord};
