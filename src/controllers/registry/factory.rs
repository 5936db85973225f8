use std::collections::HashMap;
use std::sync::Arc;

use crate::controllers::registry::fractal_record::FractalRecord;
use crate::core::data::parameter_map::ParameterMap;
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::escape_time::formula::EscapeTimeFormula;
use crate::core::fractals::fractal::Fractal;
use crate::core::fractals::strategy::RenderStrategy;
use crate::core::palettes::factory::palette_factory;
use crate::core::palettes::{ColourPalette, PaletteKind};

pub type FractalConstructor =
    fn(&FractalRecord, &EngineConfig) -> Result<Fractal, ConfigurationError>;

pub const MANDELBROT_CLASS: &str = "mandelbrot";
pub const JULIA_CLASS: &str = "julia";
pub const SHADER_CLASS: &str = "shader";

/// Maps renderer class tags to constructors. Tags compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct FractalFactory {
    constructors: HashMap<String, FractalConstructor>,
}

impl FractalFactory {
    /// An empty factory; every class tag is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        factory.register(MANDELBROT_CLASS, build_mandelbrot);
        factory.register(JULIA_CLASS, build_julia);
        factory.register(SHADER_CLASS, build_shader);
        factory
    }

    /// Adds or replaces the constructor for `class`.
    pub fn register(&mut self, class: &str, constructor: FractalConstructor) {
        self.constructors
            .insert(class.to_ascii_lowercase(), constructor);
    }

    #[must_use]
    pub fn supports(&self, class: &str) -> bool {
        self.constructors.contains_key(&class.to_ascii_lowercase())
    }

    pub fn build(
        &self,
        record: &FractalRecord,
        config: &EngineConfig,
    ) -> Result<Fractal, ConfigurationError> {
        let constructor = self
            .constructors
            .get(&record.class.to_ascii_lowercase())
            .ok_or_else(|| ConfigurationError::UnknownClass {
                name: record.name.clone(),
                class: record.class.clone(),
            })?;

        constructor(record, config)
    }
}

fn build_mandelbrot(
    record: &FractalRecord,
    config: &EngineConfig,
) -> Result<Fractal, ConfigurationError> {
    build_escape_time(record, config, EscapeTimeFormula::Mandelbrot)
}

fn build_julia(record: &FractalRecord, config: &EngineConfig) -> Result<Fractal, ConfigurationError> {
    build_escape_time(record, config, EscapeTimeFormula::Julia)
}

fn build_escape_time(
    record: &FractalRecord,
    config: &EngineConfig,
    formula: EscapeTimeFormula,
) -> Result<Fractal, ConfigurationError> {
    Fractal::new(
        record.name.clone(),
        RenderStrategy::Cpu(formula),
        parameters(record),
        resolve_palette(record, config)?,
        record.thumbnail.clone(),
    )
}

fn build_shader(record: &FractalRecord, config: &EngineConfig) -> Result<Fractal, ConfigurationError> {
    let shaders = record
        .shaders
        .clone()
        .ok_or_else(|| ConfigurationError::MissingShader {
            name: record.name.clone(),
        })?;

    Fractal::new(
        record.name.clone(),
        RenderStrategy::Gpu(shaders),
        parameters(record),
        resolve_palette(record, config)?,
        record.thumbnail.clone(),
    )
}

fn parameters(record: &FractalRecord) -> ParameterMap {
    record
        .parameters
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect()
}

/// `None` leaves the fractal on its default grayscale palette.
fn resolve_palette(
    record: &FractalRecord,
    config: &EngineConfig,
) -> Result<Option<Arc<dyn ColourPalette>>, ConfigurationError> {
    let Some(identifier) = record.palette.as_deref() else {
        return Ok(None);
    };

    let kind = PaletteKind::from_identifier(identifier).ok_or_else(|| {
        ConfigurationError::UnknownPalette {
            name: record.name.clone(),
            palette: identifier.to_owned(),
        }
    })?;

    palette_factory(kind, config.palette_size)
        .map(Some)
        .map_err(|source| ConfigurationError::InvalidPaletteSize {
            name: record.name.clone(),
            source,
        })
}
