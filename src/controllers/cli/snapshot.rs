use std::error::Error;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use log::info;

use crate::controllers::engine::errors::{EngineError, ExportError};
use crate::controllers::engine::fractal_engine::FractalEngine;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::registry::fractal_registry::FractalRegistry;
use crate::core::data::bitmap::Bitmap;
use crate::core::data::dimensions::Dimensions;
use crate::core::engine_config::EngineConfig;
use crate::presenters::channel::ChannelPresenterPort;

/// Renders one fractal off-screen and hands the export to a file presenter.
pub struct SnapshotController<P: FilePresenterPort> {
    presenter: P,
    engine: FractalEngine,
    events: Receiver<RenderEvent>,
    bitmap: Option<Arc<Bitmap>>,
}

impl<P: FilePresenterPort> SnapshotController<P> {
    pub fn new(
        presenter: P,
        registry: FractalRegistry,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let (port, events) = ChannelPresenterPort::new();
        let engine = FractalEngine::new(registry, config, Arc::new(port))?;

        Ok(Self {
            presenter,
            engine,
            events,
            bitmap: None,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &FractalEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut FractalEngine {
        &mut self.engine
    }

    /// Renders `fractal` at `dimensions` and waits for the result.
    pub fn generate(
        &mut self,
        fractal: &str,
        dimensions: Dimensions,
    ) -> Result<Arc<Bitmap>, Box<dyn Error>> {
        self.engine.select(fractal)?;
        let generation = self.engine.resize(dimensions);

        println!("Rendering {}...", fractal);
        println!("Image size: {}x{}", dimensions.width(), dimensions.height());

        loop {
            match self.events.recv()? {
                RenderEvent::Frame(frame) if frame.generation == generation => {
                    println!("Duration:   {} ms", frame.elapsed_millis());
                    break;
                }
                RenderEvent::Error(error) if error.generation == generation => {
                    return Err(Box::new(error));
                }
                other => info!("ignoring event for generation {}", other.generation()),
            }
        }

        let bitmap = self.engine.exportable_bitmap()?;
        self.bitmap = Some(Arc::clone(&bitmap));

        Ok(bitmap)
    }

    /// Writes the last generated bitmap. Fails with
    /// [`ExportError::Unavailable`] before anything has been generated.
    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let bitmap = self.bitmap.as_ref().ok_or_else(|| ExportError::Unavailable {
            fractal: self.engine.current().name().to_owned(),
            attempts: 0,
        })?;
        self.presenter.present(bitmap, filepath.as_ref())?;

        Ok(())
    }
}

impl<P: FilePresenterPort> Drop for SnapshotController<P> {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::registry::builtin_catalog::{builtin_catalog, JULIA, MANDELBROT};
    use crate::controllers::registry::factory::FractalFactory;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingFilePresenter {
        written: Mutex<Vec<(String, PathBuf)>>,
    }

    impl FilePresenterPort for &RecordingFilePresenter {
        fn present(&self, bitmap: &Bitmap, filepath: &Path) -> std::io::Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((bitmap.fractal().to_owned(), filepath.to_path_buf()));
            Ok(())
        }
    }

    fn registry() -> FractalRegistry {
        FractalRegistry::from_records(
            builtin_catalog(),
            &FractalFactory::with_builtins(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_generate_then_write_presents_bitmap() {
        let presenter = RecordingFilePresenter::default();
        let mut controller =
            SnapshotController::new(&presenter, registry(), EngineConfig::default()).unwrap();

        let bitmap = controller
            .generate(JULIA, Dimensions::new(16, 12).unwrap())
            .unwrap();
        controller.write("out/julia.ppm").unwrap();

        assert_eq!(bitmap.fractal(), JULIA);
        assert_eq!(bitmap.dimensions(), Dimensions::new(16, 12).unwrap());
        assert_eq!(
            *presenter.written.lock().unwrap(),
            vec![(JULIA.to_owned(), PathBuf::from("out/julia.ppm"))]
        );
    }

    #[test]
    fn test_write_before_generate_reports_export_unavailable() {
        let presenter = RecordingFilePresenter::default();
        let controller =
            SnapshotController::new(&presenter, registry(), EngineConfig::default()).unwrap();

        let error = controller.write("out/nothing.ppm").unwrap_err();

        assert_eq!(
            error.downcast_ref::<ExportError>(),
            Some(&ExportError::Unavailable {
                fractal: MANDELBROT.to_owned(),
                attempts: 0,
            })
        );
        assert!(presenter.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_fractal_is_reported() {
        let presenter = RecordingFilePresenter::default();
        let mut controller =
            SnapshotController::new(&presenter, registry(), EngineConfig::default()).unwrap();

        assert!(controller
            .generate("Newton", Dimensions::new(4, 4).unwrap())
            .is_err());
    }

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn test_gpu_fractal_without_gpu_support_fails_visibly() {
        use crate::controllers::registry::builtin_catalog::MANDELBROT_GPU;

        let presenter = RecordingFilePresenter::default();
        let mut controller =
            SnapshotController::new(&presenter, registry(), EngineConfig::default()).unwrap();

        let error = controller
            .generate(MANDELBROT_GPU, Dimensions::new(4, 4).unwrap())
            .unwrap_err();

        assert!(error.to_string().contains(MANDELBROT_GPU));
    }
}
