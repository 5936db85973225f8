use crate::core::data::complex::Complex;
use crate::core::data::parameter_map::ParameterMap;

pub const JULIA_DEFAULT_C: Complex = Complex::new(-0.7, 0.27);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeTimeFormula {
    /// `z₀ = 0`, `z ← z² + pixel`.
    Mandelbrot,
    /// `z₀ = pixel`, `z ← z² + c` with `c = (cX, cY)`.
    Julia,
}

impl EscapeTimeFormula {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    /// Formula-specific constant read from the parameters.
    #[must_use]
    pub fn constant(self, parameters: &ParameterMap) -> Complex {
        match self {
            Self::Mandelbrot => Complex::ZERO,
            Self::Julia => Complex::new(
                parameters
                    .get("cX")
                    .map_or(JULIA_DEFAULT_C.real, f64::from),
                parameters
                    .get("cY")
                    .map_or(JULIA_DEFAULT_C.imag, f64::from),
            ),
        }
    }

    /// Iterations taken for `point` to leave the escape radius, or
    /// `max_iterations` if it never does.
    #[must_use]
    pub fn iterate(
        self,
        point: Complex,
        constant: Complex,
        max_iterations: u32,
        escape_radius_squared: f64,
    ) -> u32 {
        let (mut z, c) = match self {
            Self::Mandelbrot => (Complex::ZERO, point),
            Self::Julia => (point, constant),
        };

        for iteration in 0..max_iterations {
            if z.magnitude_squared() > escape_radius_squared {
                return iteration;
            }
            z = z.square() + c;
        }

        max_iterations
    }
}
