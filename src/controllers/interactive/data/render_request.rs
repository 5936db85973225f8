use std::sync::Arc;

use crate::core::actions::cancellation::CancellationToken;
use crate::core::data::dimensions::Dimensions;
use crate::core::fractals::fractal::Fractal;

/// One render task: created per request, cancelled when superseded,
/// dropped after it completes. Never reused.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    generation: u64,
    fractal: Arc<Fractal>,
    dimensions: Dimensions,
    token: CancellationToken,
}

impl RenderRequest {
    #[must_use]
    pub fn new(generation: u64, fractal: Arc<Fractal>, dimensions: Dimensions) -> Self {
        Self {
            generation,
            fractal,
            dimensions,
            token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn fractal(&self) -> &Arc<Fractal> {
        &self.fractal
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
