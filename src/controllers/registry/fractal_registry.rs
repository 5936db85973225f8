use std::sync::Arc;

use log::{debug, warn};

use crate::controllers::registry::factory::FractalFactory;
use crate::controllers::registry::fractal_record::FractalRecord;
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::fractal::Fractal;

/// A catalog record that could not be turned into a selectable fractal.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub record: FractalRecord,
    pub error: ConfigurationError,
}

/// The selectable fractals, in catalog order, plus everything that was rejected.
#[derive(Debug, Default)]
pub struct FractalRegistry {
    fractals: Vec<Arc<Fractal>>,
    rejected: Vec<RejectedRecord>,
}

impl FractalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes `records` in order. A bad record is logged and kept aside;
    /// it never stops the rest of the catalog from loading.
    pub fn from_records<I>(records: I, factory: &FractalFactory, config: &EngineConfig) -> Self
    where
        I: IntoIterator<Item = FractalRecord>,
    {
        let mut registry = Self::new();
        for record in records {
            let _ = registry.register(record, factory, config);
        }
        registry
    }

    pub fn register(
        &mut self,
        record: FractalRecord,
        factory: &FractalFactory,
        config: &EngineConfig,
    ) -> Result<Arc<Fractal>, ConfigurationError> {
        let built = if self.contains(&record.name) {
            Err(ConfigurationError::DuplicateName {
                name: record.name.clone(),
            })
        } else {
            factory.build(&record, config)
        };

        match built {
            Ok(fractal) => {
                debug!(
                    "registered fractal '{}' ({})",
                    fractal.name(),
                    fractal.strategy_kind().display_name()
                );
                let fractal = Arc::new(fractal);
                self.fractals.push(Arc::clone(&fractal));
                Ok(fractal)
            }
            Err(error) => {
                warn!("rejected catalog record '{}': {}", record.name, error);
                self.rejected.push(RejectedRecord {
                    record,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Fractal>> {
        self.fractals.iter().find(|fractal| fractal.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Arc<Fractal>> {
        self.fractals.first()
    }

    /// Index of `name` in catalog order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fractals.iter().position(|fractal| fractal.name() == name)
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Arc<Fractal>> {
        self.fractals.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fractals.iter().map(|fractal| fractal.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Fractal>> {
        self.fractals.iter()
    }

    #[must_use]
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fractals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fractals.is_empty()
    }
}
