//! Touch and pointer input mapped onto fractal parameters.

pub mod controller;
pub mod pointer_tracker;

pub use controller::{GestureController, GestureOutcome};
pub use pointer_tracker::{PointerDelta, PointerTracker};
