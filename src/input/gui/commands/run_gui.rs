use std::error::Error;
use std::marker::PhantomData;

use log::info;
use winit::{dpi::LogicalSize, event_loop::EventLoopBuilder, window::{Window, WindowBuilder}};

use crate::controllers::engine::fractal_engine::FractalEngine;
use crate::controllers::registry::{builtin_catalog, FractalFactory, FractalRecord, FractalRegistry};
use crate::core::engine_config::EngineConfig;
use crate::input::gui::{
    app::{gui_app::GuiApp, ports::presenter::GuiPresenterPort},
    commands::ports::presenter_factory::GuiPresenterFactoryPort,
    events::GuiEvent,
};

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: EngineConfig,
    catalog: Vec<FractalRecord>,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    /// Viewer over the built-in catalog with default settings.
    pub fn new(presenter_factory: F) -> Self {
        Self {
            presenter_factory,
            config: EngineConfig::default(),
            catalog: builtin_catalog(),
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Vec<FractalRecord>) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn execute(self) -> Result<(), Box<dyn Error>> {
        let registry = FractalRegistry::from_records(
            self.catalog,
            &FractalFactory::with_builtins(),
            &self.config,
        );
        info!(
            "{} fractals available, {} rejected",
            registry.len(),
            registry.rejected().len()
        );

        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        // pixels needs a 'static surface target
        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Fractal Zoo")
                .with_inner_size(LogicalSize::new(800.0, 600.0))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)?,
        ));

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy)?;
        let engine = FractalEngine::new(registry, self.config, presenter.share_port())?;
        let app = GuiApp::new(window, &event_loop, presenter, engine);

        app.run(event_loop)
    }
}
