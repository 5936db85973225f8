pub mod actions;
pub mod cache;
pub mod data;
pub mod engine_config;
pub mod fractals;
pub mod gestures;
pub mod gpu;
pub mod palettes;
