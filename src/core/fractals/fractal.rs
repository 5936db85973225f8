use std::sync::Arc;

use crate::core::data::parameter_map::{ParameterMap, SharedParameters};
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::strategy::{RenderStrategy, ShaderSource, StrategyKind};
use crate::core::palettes::grayscale::GrayscalePalette;
use crate::core::palettes::ColourPalette;

/// A named fractal definition: live parameters, a palette and a render strategy.
///
/// Shared as `Arc<Fractal>` between the engine and render workers. Only the
/// parameters change after construction.
#[derive(Debug)]
pub struct Fractal {
    name: String,
    parameters: SharedParameters,
    palette: Arc<dyn ColourPalette>,
    strategy: RenderStrategy,
    thumbnail: Option<String>,
}

impl Fractal {
    /// Fails with [`ConfigurationError::MissingShader`] for a GPU strategy
    /// whose shader text is blank. A missing palette falls back to grayscale.
    pub fn new(
        name: impl Into<String>,
        strategy: RenderStrategy,
        parameters: ParameterMap,
        palette: Option<Arc<dyn ColourPalette>>,
        thumbnail: Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();

        if let RenderStrategy::Gpu(shaders) = &strategy {
            if !shaders.is_complete() {
                return Err(ConfigurationError::MissingShader { name });
            }
        }

        Ok(Self {
            name,
            parameters: SharedParameters::new(parameters),
            palette: palette.unwrap_or_else(|| Arc::new(GrayscalePalette)),
            strategy,
            thumbnail,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameters(&self) -> &SharedParameters {
        &self.parameters
    }

    #[must_use]
    pub fn palette(&self) -> &Arc<dyn ColourPalette> {
        &self.palette
    }

    #[must_use]
    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    #[must_use]
    pub fn shader_source(&self) -> Option<&ShaderSource> {
        self.strategy.shader_source()
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Creates or overwrites each named value in one atomic update.
    pub fn update_parameters<I, S>(&self, values: I)
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        self.parameters.with(|map| {
            for (name, value) in values {
                map.set(name.as_ref(), value);
            }
        });
    }
}
