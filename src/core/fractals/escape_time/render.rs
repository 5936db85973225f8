use std::error::Error;
use std::fmt;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    generate_fractal_parallel_rayon, GenerateFractalError,
};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    generate_pixel_buffer, GeneratePixelBufferError,
};
use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::ParameterMap;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;
use crate::core::fractals::escape_time::formula::EscapeTimeFormula;
use crate::core::fractals::escape_time::viewport::PixelToPlaneError;
use crate::core::palettes::ColourPalette;

#[derive(Debug)]
pub enum EscapeTimeRenderError {
    Cancelled(Cancelled),
    Configuration(ConfigurationError),
    Mapping(PixelToPlaneError),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for EscapeTimeRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::Configuration(err) => write!(f, "configuration error: {}", err),
            Self::Mapping(err) => write!(f, "pixel mapping error: {}", err),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for EscapeTimeRenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::Configuration(err) => Some(err),
            Self::Mapping(err) => Some(err),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<GenerateFractalError<PixelToPlaneError>> for EscapeTimeRenderError {
    fn from(err: GenerateFractalError<PixelToPlaneError>) -> Self {
        match err {
            GenerateFractalError::Cancelled(c) => Self::Cancelled(c),
            GenerateFractalError::Algorithm(e) => Self::Mapping(e),
        }
    }
}

impl From<GeneratePixelBufferError> for EscapeTimeRenderError {
    fn from(err: GeneratePixelBufferError) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(c) => Self::Cancelled(c),
            GeneratePixelBufferError::PixelBuffer(e) => Self::PixelBuffer(e),
        }
    }
}

/// Renders one frame on the CPU from a parameter snapshot.
///
/// Pure in `(formula, parameters, palette, dimensions, config)`; the output
/// does not depend on how rayon schedules the rows.
pub fn render_escape_time<C>(
    formula: EscapeTimeFormula,
    parameters: &ParameterMap,
    palette: &dyn ColourPalette,
    dimensions: Dimensions,
    config: &EngineConfig,
    cancel: &C,
) -> Result<PixelBuffer, EscapeTimeRenderError>
where
    C: CancelToken + ?Sized,
{
    let algorithm = EscapeTimeAlgorithm::new(formula, parameters, dimensions, config)
        .map_err(EscapeTimeRenderError::Configuration)?;

    let intensities = generate_fractal_parallel_rayon(dimensions, &algorithm, cancel)?;

    Ok(generate_pixel_buffer(&intensities, palette, dimensions, cancel)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::{CancellationToken, NeverCancel};
    use crate::core::palettes::copper::CopperPalette;
    use crate::core::palettes::grayscale::GrayscalePalette;

    fn params() -> ParameterMap {
        [("centerX", -0.5), ("centerY", 0.0), ("scale", 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_identical_inputs_give_identical_buffers() {
        let dimensions = Dimensions::new(64, 48).unwrap();
        let palette = CopperPalette::new(256).unwrap();
        let config = EngineConfig::default();

        let first = render_escape_time(
            EscapeTimeFormula::Mandelbrot,
            &params(),
            &palette,
            dimensions,
            &config,
            &NeverCancel,
        )
        .unwrap();
        let second = render_escape_time(
            EscapeTimeFormula::Mandelbrot,
            &params(),
            &palette,
            dimensions,
            &config,
            &NeverCancel,
        )
        .unwrap();

        assert_eq!(first.pixels(), second.pixels());
        assert_eq!(first.to_rgb_bytes(), second.to_rgb_bytes());
    }

    #[test]
    fn test_julia_and_mandelbrot_differ() {
        let dimensions = Dimensions::new(32, 32).unwrap();
        let config = EngineConfig::default();

        let mandelbrot = render_escape_time(
            EscapeTimeFormula::Mandelbrot,
            &params(),
            &GrayscalePalette,
            dimensions,
            &config,
            &NeverCancel,
        )
        .unwrap();
        let julia = render_escape_time(
            EscapeTimeFormula::Julia,
            &params(),
            &GrayscalePalette,
            dimensions,
            &config,
            &NeverCancel,
        )
        .unwrap();

        assert_ne!(mandelbrot.pixels(), julia.pixels());
    }

    #[test]
    fn test_cancelled_render_returns_no_buffer() {
        let dimensions = Dimensions::new(32, 32).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let result = render_escape_time(
            EscapeTimeFormula::Mandelbrot,
            &params(),
            &GrayscalePalette,
            dimensions,
            &EngineConfig::default(),
            &token,
        );

        assert!(matches!(result, Err(EscapeTimeRenderError::Cancelled(_))));
    }

    #[test]
    fn test_interior_renders_palette_zero_colour() {
        let zoomed_in: ParameterMap = [("centerX", 0.0), ("centerY", 0.0), ("scale", 1000.0)]
            .into_iter()
            .collect();
        let dimensions = Dimensions::new(8, 8).unwrap();
        let palette = CopperPalette::new(256).unwrap();

        let buffer = render_escape_time(
            EscapeTimeFormula::Mandelbrot,
            &zoomed_in,
            &palette,
            dimensions,
            &EngineConfig::default(),
            &NeverCancel,
        )
        .unwrap();

        assert!(buffer.pixels().iter().all(|&p| p == palette.colour_at(0.0)));
    }
}
