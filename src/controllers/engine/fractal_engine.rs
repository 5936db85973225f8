use std::sync::Arc;
use std::thread;

use log::{debug, info};

use crate::controllers::engine::errors::{EngineError, ExportError};
use crate::controllers::interactive::ports::presenter::RenderPresenterPort;
use crate::controllers::interactive::renderer::{FrameRenderer, StrategyRenderer};
use crate::controllers::interactive::scheduler::RenderScheduler;
use crate::controllers::registry::fractal_registry::FractalRegistry;
use crate::core::cache::render_cache::RenderCache;
use crate::core::data::bitmap::Bitmap;
use crate::core::data::dimensions::Dimensions;
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::errors::ConfigurationError;
use crate::core::fractals::fractal::Fractal;
use crate::core::gestures::controller::{GestureController, GestureOutcome};
use crate::core::gestures::pointer_tracker::{PointerDelta, PointerTracker};

/// Everything one fractal view needs, driven from the interactive thread.
///
/// None of these calls block on a render. Results arrive through the
/// presenter port handed to [`FractalEngine::new`].
pub struct FractalEngine {
    config: EngineConfig,
    registry: FractalRegistry,
    current: Arc<Fractal>,
    cache: Arc<RenderCache>,
    scheduler: RenderScheduler,
    gestures: GestureController,
    pointers: PointerTracker,
    surface: Option<Dimensions>,
}

impl FractalEngine {
    /// Starts on the first fractal of `registry`.
    pub fn new(
        registry: FractalRegistry,
        config: EngineConfig,
        presenter_port: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, EngineError> {
        let renderer = Box::new(StrategyRenderer::new(config.clone()));
        Self::with_renderer(registry, config, presenter_port, renderer)
    }

    pub fn with_renderer(
        registry: FractalRegistry,
        config: EngineConfig,
        presenter_port: Arc<dyn RenderPresenterPort>,
        renderer: Box<dyn FrameRenderer>,
    ) -> Result<Self, EngineError> {
        let current = registry
            .first()
            .cloned()
            .ok_or(ConfigurationError::EmptyCatalog)?;
        let cache = Arc::new(RenderCache::new());
        let scheduler = RenderScheduler::new(presenter_port, Arc::clone(&cache), renderer)?;

        Ok(Self {
            gestures: GestureController::new(config.touch_scale),
            config,
            registry,
            current,
            cache,
            scheduler,
            pointers: PointerTracker::new(),
            surface: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &FractalRegistry {
        &self.registry
    }

    pub fn fractals(&self) -> impl Iterator<Item = &Arc<Fractal>> {
        self.registry.iter()
    }

    #[must_use]
    pub fn current(&self) -> &Arc<Fractal> {
        &self.current
    }

    #[must_use]
    pub fn surface(&self) -> Option<Dimensions> {
        self.surface
    }

    /// Makes `name` current. Any render of the previous fractal is cancelled,
    /// and a fresh one starts when the surface size is known.
    pub fn select(&mut self, name: &str) -> Result<Arc<Fractal>, ConfigurationError> {
        let fractal = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownFractal {
                name: name.to_owned(),
            })?;

        info!("selected fractal '{}'", fractal.name());
        self.scheduler.cancel();
        self.current = Arc::clone(&fractal);
        self.request_render();

        Ok(fractal)
    }

    /// Moves `offset` places through the catalog, wrapping at either end.
    pub fn select_relative(&mut self, offset: isize) -> Arc<Fractal> {
        let len = self.registry.len() as isize;
        let index = self.registry.position(self.current.name()).unwrap_or(0) as isize;
        let next = (index + offset).rem_euclid(len.max(1)) as usize;

        match self.registry.at(next).map(|fractal| fractal.name().to_owned()) {
            Some(name) => self.select(&name).unwrap_or_else(|_| Arc::clone(&self.current)),
            None => Arc::clone(&self.current),
        }
    }

    /// New surface size; re-renders the current fractal at it.
    pub fn resize(&mut self, dimensions: Dimensions) -> u64 {
        self.surface = Some(dimensions);
        self.gestures.set_surface(dimensions);
        self.scheduler
            .submit_request(Arc::clone(&self.current), dimensions)
    }

    /// Re-renders the current fractal at the current surface size. Returns
    /// the request's generation, or `None` before the first resize.
    pub fn request_render(&mut self) -> Option<u64> {
        let Some(surface) = self.surface else {
            debug!("render of '{}' skipped: no surface yet", self.current.name());
            return None;
        };

        Some(
            self.scheduler
                .submit_request(Arc::clone(&self.current), surface),
        )
    }

    /// Renders any fractal at an explicit size, superseding whatever this
    /// view was rendering.
    pub fn request_render_for(&mut self, fractal: &Arc<Fractal>, dimensions: Dimensions) -> u64 {
        self.scheduler.submit_request(Arc::clone(fractal), dimensions)
    }

    /// The last completed image of the current fractal, if any.
    #[must_use]
    pub fn current_bitmap(&self) -> Option<Arc<Bitmap>> {
        self.cache.get(self.current.name())
    }

    #[must_use]
    pub fn bitmap_for(&self, fractal: &str) -> Option<Arc<Bitmap>> {
        self.cache.get(fractal)
    }

    /// Waits for a completed image of the current fractal, checking up to
    /// `export_attempts` times `export_retry_interval` apart. Blocks, so call
    /// it off the interactive thread.
    pub fn exportable_bitmap(&self) -> Result<Arc<Bitmap>, ExportError> {
        let attempts = self.config.export_attempts.max(1);

        for attempt in 1..=attempts {
            if let Some(bitmap) = self.current_bitmap() {
                return Ok(bitmap);
            }
            if attempt < attempts {
                debug!(
                    "export of '{}' waiting for a render ({}/{})",
                    self.current.name(),
                    attempt,
                    attempts
                );
                thread::sleep(self.config.export_retry_interval);
            }
        }

        Err(ExportError::Unavailable {
            fractal: self.current.name().to_owned(),
            attempts,
        })
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.gestures.on_pointer_down(x, y);
        self.pointers.sample(&[(x, y)]);
    }

    /// Feeds the positions of every pointer currently down.
    pub fn on_pointer_sample(&mut self, pointers: &[(f32, f32)]) -> Option<PointerDelta> {
        let delta = self.pointers.sample(pointers)?;

        match delta {
            PointerDelta::Drag { dx, dy } => {
                self.on_drag_delta(dx, dy);
            }
            PointerDelta::Pinch {
                old_distance,
                new_distance,
            } => {
                self.on_pinch(old_distance, new_distance);
            }
        }

        Some(delta)
    }

    /// Last pointer lifted.
    pub fn on_pointer_up(&mut self) -> GestureOutcome {
        self.pointers.release();
        self.on_gesture_end()
    }

    /// Pans the current fractal. Renders only when the gesture ends.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) -> bool {
        self.gestures
            .on_drag_delta(self.current.parameters(), dx, dy)
    }

    /// Zooms the current fractal. Renders only when the gesture ends.
    pub fn on_pinch(&mut self, old_distance: f32, new_distance: f32) -> bool {
        self.gestures
            .on_pinch(self.current.parameters(), old_distance, new_distance)
    }

    pub fn on_gesture_end(&mut self) -> GestureOutcome {
        let outcome = self.gestures.on_gesture_end();
        if outcome == GestureOutcome::Render {
            self.request_render();
        }
        outcome
    }

    /// Explicit settings change on the current fractal, followed by a render.
    pub fn update_parameters<I, S>(&mut self, values: I) -> Option<u64>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        self.current.update_parameters(values);
        self.request_render()
    }

    pub fn set_visible(&self, visible: bool) {
        self.scheduler.set_visible(visible);
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.scheduler.last_completed_generation()
    }

    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::data::render_request::RenderRequest;
    use crate::controllers::interactive::events::render::RenderEvent;
    use crate::controllers::interactive::renderer::RenderOutcome;
    use crate::controllers::registry::factory::FractalFactory;
    use crate::controllers::registry::fractal_record::FractalRecord;
    use crate::core::actions::cancellation::CancelToken;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl RenderPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Records which generations and parameter snapshots it was asked for.
    #[derive(Clone, Default)]
    struct RecordingRenderer {
        seen: Arc<Mutex<Vec<(u64, Option<f32>)>>>,
    }

    impl FrameRenderer for RecordingRenderer {
        fn render(
            &mut self,
            request: &RenderRequest,
            _cancel: &dyn CancelToken,
        ) -> Result<PixelBuffer, RenderOutcome> {
            let center_x = request.fractal().parameters().get("centerX");
            self.seen
                .lock()
                .unwrap()
                .push((request.generation(), center_x));
            Ok(PixelBuffer::new(request.dimensions()))
        }
    }

    fn registry() -> FractalRegistry {
        FractalRegistry::from_records(
            vec![
                FractalRecord::new("Mandelbrot", "mandelbrot")
                    .with_parameter("centerX", 0.0)
                    .with_parameter("centerY", 0.0)
                    .with_parameter("scale", 2.0),
                FractalRecord::new("Julia", "julia"),
            ],
            &FractalFactory::with_builtins(),
            &EngineConfig::default(),
        )
    }

    fn quick_export() -> EngineConfig {
        EngineConfig {
            export_attempts: 3,
            export_retry_interval: Duration::from_millis(5),
            ..EngineConfig::default()
        }
    }

    fn engine_with(
        config: EngineConfig,
    ) -> (FractalEngine, RecordingRenderer, Arc<MockPresenterPort>) {
        let renderer = RecordingRenderer::default();
        let presenter_port = Arc::new(MockPresenterPort::default());
        let engine = FractalEngine::with_renderer(
            registry(),
            config,
            Arc::clone(&presenter_port) as Arc<dyn RenderPresenterPort>,
            Box::new(renderer.clone()),
        )
        .unwrap();
        (engine, renderer, presenter_port)
    }

    fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let result = FractalEngine::new(
            FractalRegistry::new(),
            EngineConfig::default(),
            Arc::new(MockPresenterPort::default()),
        );

        assert!(matches!(
            result,
            Err(EngineError::Configuration(ConfigurationError::EmptyCatalog))
        ));
    }

    #[test]
    fn test_render_waits_for_a_surface() {
        let (mut engine, renderer, _presenter_port) = engine_with(quick_export());

        assert_eq!(engine.request_render(), None);
        assert_eq!(engine.current().name(), "Mandelbrot");

        engine.resize(dims(8, 6));

        assert!(wait_until(Duration::from_secs(5), || {
            engine.current_bitmap().is_some()
        }));
        assert_eq!(renderer.seen.lock().unwrap().len(), 1);
        assert_eq!(engine.current_bitmap().unwrap().dimensions(), dims(8, 6));

        engine.shutdown();
    }

    #[test]
    fn test_export_returns_latest_completed_bitmap() {
        let (mut engine, _renderer, presenter_port) = engine_with(quick_export());

        let generation = engine.resize(dims(4, 4));
        assert!(wait_until(Duration::from_secs(5), || {
            engine.last_completed_generation() == generation
        }));

        let bitmap = engine.exportable_bitmap().unwrap();
        assert_eq!(bitmap.fractal(), "Mandelbrot");
        assert_eq!(bitmap.version(), generation);
        assert!(presenter_port
            .events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, RenderEvent::Frame(_))));

        engine.shutdown();
    }

    #[test]
    fn test_export_without_render_reports_unavailable() {
        let (mut engine, _renderer, _presenter_port) = engine_with(quick_export());

        assert_eq!(
            engine.exportable_bitmap().unwrap_err(),
            ExportError::Unavailable {
                fractal: "Mandelbrot".to_owned(),
                attempts: 3,
            }
        );

        engine.shutdown();
    }

    #[test]
    fn test_select_switches_current_fractal() {
        let (mut engine, _renderer, _presenter_port) = engine_with(quick_export());

        let julia = engine.select("Julia").unwrap();

        assert!(Arc::ptr_eq(&julia, engine.current()));
        assert_eq!(
            engine.select("Newton").unwrap_err(),
            ConfigurationError::UnknownFractal {
                name: "Newton".to_owned()
            }
        );
        assert_eq!(engine.current().name(), "Julia");
        assert_eq!(engine.select_relative(1).name(), "Mandelbrot");
        assert_eq!(engine.select_relative(-1).name(), "Julia");

        engine.shutdown();
    }

    #[test]
    fn test_drag_gesture_renders_once_on_release() {
        let (mut engine, renderer, _presenter_port) = engine_with(quick_export());
        engine.set_visible(false);
        engine.resize(dims(200, 200));

        engine.on_pointer_down(100.0, 100.0);
        engine.on_pointer_sample(&[(105.0, 100.0)]);
        engine.on_pointer_sample(&[(110.0, 100.0)]);
        let outcome = engine.on_pointer_up();
        engine.set_visible(true);

        assert_eq!(outcome, GestureOutcome::Render);
        assert!(wait_until(Duration::from_secs(5), || {
            !renderer.seen.lock().unwrap().is_empty()
        }));
        thread::sleep(Duration::from_millis(50));

        let seen = renderer.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        let center_x = seen[0].1.unwrap();
        assert!((center_x - 0.075).abs() < 1e-6);

        engine.shutdown();
    }

    #[test]
    fn test_tap_does_not_render() {
        let (mut engine, renderer, _presenter_port) = engine_with(quick_export());

        engine.on_pointer_down(3.0, 4.0);
        let outcome = engine.on_pointer_up();

        assert_eq!(outcome, GestureOutcome::Tap { x: 3.0, y: 4.0 });
        thread::sleep(Duration::from_millis(50));
        assert!(renderer.seen.lock().unwrap().is_empty());

        engine.shutdown();
    }

    #[test]
    fn test_pinch_then_end_scales_current_fractal() {
        let (mut engine, _renderer, _presenter_port) = engine_with(quick_export());

        engine.on_pinch(100.0, 150.0);
        engine.on_gesture_end();

        assert_eq!(engine.current().parameters().get("scale"), Some(3.0));

        engine.shutdown();
    }

    #[test]
    fn test_update_parameters_triggers_render_with_new_values() {
        let (mut engine, renderer, _presenter_port) = engine_with(quick_export());
        engine.set_visible(false);
        engine.resize(dims(4, 4));

        let generation = engine.update_parameters([("centerX", 1.25)]).unwrap();
        engine.set_visible(true);

        assert!(wait_until(Duration::from_secs(5), || {
            engine.last_completed_generation() == generation
        }));
        assert_eq!(
            renderer.seen.lock().unwrap().last().copied(),
            Some((generation, Some(1.25)))
        );

        engine.shutdown();
    }
}
