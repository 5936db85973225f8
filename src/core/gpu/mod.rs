//! Shader-based strategy: an off-screen surface driven through a small state machine.

pub mod errors;
pub mod pipeline;
pub mod readback;
pub mod surface;
pub mod uniforms;
#[cfg(feature = "gpu")]
pub mod wgpu_surface;

pub use errors::{GpuRenderError, SurfaceError};
pub use pipeline::{GpuFrame, GpuRenderer, GpuState};
pub use surface::{OffscreenSurface, SurfaceFactory};

pub const QUAD_VERTEX_SHADER: &str = include_str!("shaders/quad.vert.wgsl");
pub const MANDELBROT_FRAGMENT_SHADER: &str = include_str!("shaders/mandelbrot.frag.wgsl");

/// Entry point name expected in both vertex and fragment shader text.
pub const SHADER_ENTRY_POINT: &str = "main";
