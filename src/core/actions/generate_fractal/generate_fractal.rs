use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;

/// Single-threaded row-major generation. Reference for the parallel path.
pub fn generate_fractal<Alg: FractalAlgorithm>(
    dimensions: Dimensions,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    (0..dimensions.height())
        .flat_map(|y| (0..dimensions.width()).map(move |x| Point { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}
