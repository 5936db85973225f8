use crate::controllers::registry::factory::{JULIA_CLASS, MANDELBROT_CLASS, SHADER_CLASS};
use crate::controllers::registry::fractal_record::FractalRecord;
use crate::core::fractals::escape_time::formula::JULIA_DEFAULT_C;
use crate::core::fractals::strategy::ShaderSource;
use crate::core::gpu::{MANDELBROT_FRAGMENT_SHADER, QUAD_VERTEX_SHADER};

pub const MANDELBROT: &str = "Mandelbrot";
pub const JULIA: &str = "Julia";
pub const MANDELBROT_GPU: &str = "Mandelbrot (GPU)";

/// Demo catalog used by the binaries when no loader supplies one.
#[must_use]
pub fn builtin_catalog() -> Vec<FractalRecord> {
    vec![
        FractalRecord::new(MANDELBROT, MANDELBROT_CLASS)
            .with_parameter("centerX", -0.5)
            .with_parameter("centerY", 0.0)
            .with_parameter("scale", 1.0)
            .with_palette("copper"),
        FractalRecord::new(JULIA, JULIA_CLASS)
            .with_parameter("centerX", 0.0)
            .with_parameter("centerY", 0.0)
            .with_parameter("scale", 1.0)
            .with_parameter("cX", JULIA_DEFAULT_C.real as f32)
            .with_parameter("cY", JULIA_DEFAULT_C.imag as f32),
        // The fragment shader reads its four parameters positionally.
        FractalRecord::new(MANDELBROT_GPU, SHADER_CLASS)
            .with_shaders(ShaderSource::new(QUAD_VERTEX_SHADER, MANDELBROT_FRAGMENT_SHADER))
            .with_parameter("centerX", -0.5)
            .with_parameter("centerY", 0.0)
            .with_parameter("scale", 1.0)
            .with_parameter("maxIterations", 256.0)
            .with_palette("copper"),
    ]
}
