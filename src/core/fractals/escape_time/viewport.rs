use std::error::Error;
use std::fmt;

use crate::core::data::complex::Complex;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::ParameterMap;
use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToPlaneError {
    PointOutsideSurface { point: Point, dimensions: Dimensions },
}

impl fmt::Display for PixelToPlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideSurface { point, dimensions } => write!(
                f,
                "point (x: {}, y: {}) is outside the {}x{} surface",
                point.x,
                point.y,
                dimensions.width(),
                dimensions.height()
            ),
        }
    }
}

impl Error for PixelToPlaneError {}

/// Maps surface pixels to complex-plane coordinates from `centerX`, `centerY`
/// and `scale`. Plane Y grows upwards, so rows are flipped.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    dimensions: Dimensions,
    center: Complex,
    units_per_pixel: f64,
}

impl Viewport {
    /// Missing centre keys default to 0; a missing or non-positive `scale` is 1.
    #[must_use]
    pub fn from_parameters(parameters: &ParameterMap, dimensions: Dimensions, plane_span: f64) -> Self {
        let center = Complex::new(
            parameters.get("centerX").map_or(0.0, f64::from),
            parameters.get("centerY").map_or(0.0, f64::from),
        );
        let scale = parameters
            .get("scale")
            .map(f64::from)
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(1.0);

        Self {
            dimensions,
            center,
            units_per_pixel: plane_span / (f64::from(dimensions.shorter_side()) * scale),
        }
    }

    #[must_use]
    pub fn units_per_pixel(&self) -> f64 {
        self.units_per_pixel
    }

    pub fn pixel_to_plane(&self, point: Point) -> Result<Complex, PixelToPlaneError> {
        if !self.dimensions.contains_point(point) {
            return Err(PixelToPlaneError::PointOutsideSurface {
                point,
                dimensions: self.dimensions,
            });
        }

        let half_width = f64::from(self.dimensions.width()) / 2.0;
        let half_height = f64::from(self.dimensions.height()) / 2.0;

        Ok(Complex::new(
            self.center.real + (f64::from(point.x) + 0.5 - half_width) * self.units_per_pixel,
            self.center.imag - (f64::from(point.y) + 0.5 - half_height) * self.units_per_pixel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_center_pixels_straddle_the_center() {
        let params: ParameterMap = [("centerX", -0.5), ("centerY", 0.25), ("scale", 1.0)]
            .into_iter()
            .collect();
        let dimensions = Dimensions::new(100, 100).unwrap();
        let viewport = Viewport::from_parameters(&params, dimensions, 3.0);

        let top_left_of_center = viewport.pixel_to_plane(Point { x: 49, y: 49 }).unwrap();

        assert!(approx(viewport.units_per_pixel(), 0.03));
        assert!(approx(top_left_of_center.real, -0.5 - 0.015));
        assert!(approx(top_left_of_center.imag, 0.25 + 0.015));
    }

    #[test]
    fn test_rows_increase_downwards_on_screen() {
        let dimensions = Dimensions::new(10, 10).unwrap();
        let viewport = Viewport::from_parameters(&ParameterMap::new(), dimensions, 3.0);

        let top = viewport.pixel_to_plane(Point { x: 0, y: 0 }).unwrap();
        let bottom = viewport.pixel_to_plane(Point { x: 0, y: 9 }).unwrap();

        assert!(top.imag > bottom.imag);
    }

    #[test]
    fn test_scale_zooms_in() {
        let dimensions = Dimensions::new(200, 100).unwrap();
        let zoomed: ParameterMap = [("scale", 4.0)].into_iter().collect();

        let wide = Viewport::from_parameters(&ParameterMap::new(), dimensions, 3.0);
        let narrow = Viewport::from_parameters(&zoomed, dimensions, 3.0);

        assert!(approx(wide.units_per_pixel(), 0.03));
        assert!(approx(narrow.units_per_pixel(), 0.0075));
    }

    #[test]
    fn test_non_positive_scale_is_treated_as_one() {
        let dimensions = Dimensions::new(100, 100).unwrap();
        let zero: ParameterMap = [("scale", 0.0)].into_iter().collect();

        let viewport = Viewport::from_parameters(&zero, dimensions, 3.0);

        assert!(approx(viewport.units_per_pixel(), 0.03));
    }

    #[test]
    fn test_point_outside_surface_is_an_error() {
        let dimensions = Dimensions::new(10, 10).unwrap();
        let viewport = Viewport::from_parameters(&ParameterMap::new(), dimensions, 3.0);

        assert!(matches!(
            viewport.pixel_to_plane(Point { x: 10, y: 0 }),
            Err(PixelToPlaneError::PointOutsideSurface { .. })
        ));
    }
}
