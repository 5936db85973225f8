//! Windowed viewer: winit for the window, pixels for the framebuffer and egui
//! for the overlay.

pub mod app;
pub mod commands;
pub mod events;
