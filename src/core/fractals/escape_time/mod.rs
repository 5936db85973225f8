//! CPU escape-time strategy: pixel to plane mapping, iteration and colouring.

pub mod algorithm;
pub mod formula;
pub mod render;
pub mod viewport;
