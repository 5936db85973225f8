use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::strategy::ShaderSource;
use crate::core::gpu::errors::SurfaceError;
use crate::core::gpu::uniforms::UniformBlock;

/// An off-screen render target with a compiled shader program.
///
/// All calls for one surface come from a single worker thread.
pub trait OffscreenSurface: Send {
    /// Builds the target, program and palette texture for `dimensions`.
    fn initialize(
        &mut self,
        dimensions: Dimensions,
        shaders: &ShaderSource,
        palette: &[u32],
    ) -> Result<(), SurfaceError>;

    /// Draws the full-surface quad with `uniforms`.
    fn draw(&mut self, uniforms: &UniformBlock) -> Result<(), SurfaceError>;

    /// Copies the last drawn frame into a tightly packed buffer.
    fn read_back(&mut self) -> Result<PixelBuffer, SurfaceError>;

    /// Drops everything built by `initialize`.
    fn release(&mut self);
}

/// Creates surfaces on the render worker, on first use and after loss.
pub type SurfaceFactory = Box<dyn FnMut() -> Result<Box<dyn OffscreenSurface>, SurfaceError> + Send>;
