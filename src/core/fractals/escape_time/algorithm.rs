use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::ParameterMap;
use crate::core::data::point::Point;
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::escape_time::formula::EscapeTimeFormula;
use crate::core::fractals::escape_time::viewport::{PixelToPlaneError, Viewport};

/// Per-pixel normalised intensity for one parameter snapshot.
///
/// Interior points (bound reached) are 0; escaped points are
/// `iterations / max_iterations`.
#[derive(Debug)]
pub struct EscapeTimeAlgorithm {
    formula: EscapeTimeFormula,
    viewport: Viewport,
    constant: Complex,
    max_iterations: u32,
    escape_radius_squared: f64,
}

impl EscapeTimeAlgorithm {
    pub fn new(
        formula: EscapeTimeFormula,
        parameters: &ParameterMap,
        dimensions: Dimensions,
        config: &EngineConfig,
    ) -> Result<Self, ConfigurationError> {
        let max_iterations = parameters
            .get("maxIterations")
            .filter(|n| *n >= 1.0)
            .map_or(config.max_iterations, |n| n as u32);

        if max_iterations == 0 {
            return Err(ConfigurationError::ZeroMaxIterations);
        }

        Ok(Self {
            formula,
            viewport: Viewport::from_parameters(parameters, dimensions, config.plane_span),
            constant: formula.constant(parameters),
            max_iterations,
            escape_radius_squared: config.escape_radius_squared,
        })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = f32;
    type Failure = PixelToPlaneError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let point = self.viewport.pixel_to_plane(pixel)?;
        let iterations = self.formula.iterate(
            point,
            self.constant,
            self.max_iterations,
            self.escape_radius_squared,
        );

        if iterations >= self.max_iterations {
            return Ok(0.0);
        }

        Ok(iterations as f32 / self.max_iterations as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandelbrot_params() -> ParameterMap {
        [("centerX", -0.5), ("centerY", 0.0), ("scale", 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_zero_iteration_bound_is_rejected() {
        let config = EngineConfig {
            max_iterations: 0,
            ..EngineConfig::default()
        };
        let dimensions = Dimensions::new(4, 4).unwrap();

        let result = EscapeTimeAlgorithm::new(
            EscapeTimeFormula::Mandelbrot,
            &mandelbrot_params(),
            dimensions,
            &config,
        );

        assert!(matches!(result, Err(ConfigurationError::ZeroMaxIterations)));
    }

    #[test]
    fn test_max_iterations_parameter_overrides_config() {
        let mut params = mandelbrot_params();
        params.set("maxIterations", 32.0);
        let dimensions = Dimensions::new(4, 4).unwrap();

        let algorithm = EscapeTimeAlgorithm::new(
            EscapeTimeFormula::Mandelbrot,
            &params,
            dimensions,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(algorithm.max_iterations(), 32);
    }

    #[test]
    fn test_interior_pixels_have_zero_intensity() {
        // Zoomed far in on the origin, every pixel stays inside the set.
        let params: ParameterMap = [("centerX", 0.0), ("centerY", 0.0), ("scale", 1000.0)]
            .into_iter()
            .collect();
        let dimensions = Dimensions::new(8, 8).unwrap();
        let algorithm = EscapeTimeAlgorithm::new(
            EscapeTimeFormula::Mandelbrot,
            &params,
            dimensions,
            &EngineConfig::default(),
        )
        .unwrap();

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(algorithm.compute(Point { x, y }).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn test_escaped_pixels_are_normalised() {
        let params: ParameterMap = [("centerX", 2.5), ("centerY", 2.5), ("scale", 10.0)]
            .into_iter()
            .collect();
        let dimensions = Dimensions::new(4, 4).unwrap();
        let algorithm = EscapeTimeAlgorithm::new(
            EscapeTimeFormula::Mandelbrot,
            &params,
            dimensions,
            &EngineConfig::default(),
        )
        .unwrap();

        let intensity = algorithm.compute(Point { x: 1, y: 1 }).unwrap();

        assert!(intensity > 0.0 && intensity < 1.0);
        assert_eq!(intensity, 1.0 / 256.0);
    }
}
