use crate::core::fractals::strategy::ShaderSource;

/// One entry of a fractal catalog, as handed over by the catalog loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FractalRecord {
    pub name: String,
    /// Renderer class tag, resolved through the [`FractalFactory`](super::FractalFactory).
    pub class: String,
    pub shaders: Option<ShaderSource>,
    /// Initial parameters in catalog order.
    pub parameters: Vec<(String, f32)>,
    pub palette: Option<String>,
    pub thumbnail: Option<String>,
}

impl FractalRecord {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: f32) -> Self {
        self.parameters.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    #[must_use]
    pub fn with_shaders(mut self, shaders: ShaderSource) -> Self {
        self.shaders = Some(shaders);
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}
