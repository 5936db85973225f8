pub mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;
pub mod storage;

pub use controllers::cli::SnapshotController;
pub use controllers::engine::{EngineError, ExportError, FractalEngine};
pub use controllers::interactive::{RenderEvent, RenderPresenterPort, RenderScheduler};
pub use controllers::registry::{builtin_catalog, FractalFactory, FractalRecord, FractalRegistry};
pub use crate::core::data::bitmap::Bitmap;
pub use crate::core::data::dimensions::Dimensions;
pub use crate::core::engine_config::EngineConfig;
pub use crate::core::fractals::errors::ConfigurationError;
pub use crate::core::fractals::Fractal;
pub use presenters::file::ppm::PpmFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
