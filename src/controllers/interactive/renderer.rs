use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::core::actions::cancellation::CancelToken;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::engine_config::EngineConfig;
use crate::core::fractals::escape_time::render::{render_escape_time, EscapeTimeRenderError};
use crate::core::fractals::strategy::RenderStrategy;
use crate::core::gpu::errors::GpuRenderError;
use crate::core::gpu::pipeline::{GpuFrame, GpuRenderer};
use crate::core::gpu::surface::SurfaceFactory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Cancelled,
    Error(String),
}

/// Produces the pixels for one request on the render worker.
pub trait FrameRenderer: Send {
    fn render(
        &mut self,
        request: &RenderRequest,
        cancel: &dyn CancelToken,
    ) -> Result<PixelBuffer, RenderOutcome>;
}

/// Dispatches on the fractal's strategy: escape-time on the CPU, or the
/// shader pipeline on a surface owned by this worker.
pub struct StrategyRenderer {
    config: EngineConfig,
    gpu: GpuRenderer,
}

impl StrategyRenderer {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_surface_factory(config, default_surface_factory())
    }

    #[must_use]
    pub fn with_surface_factory(config: EngineConfig, factory: SurfaceFactory) -> Self {
        Self {
            config,
            gpu: GpuRenderer::new(factory),
        }
    }
}

impl FrameRenderer for StrategyRenderer {
    fn render(
        &mut self,
        request: &RenderRequest,
        cancel: &dyn CancelToken,
    ) -> Result<PixelBuffer, RenderOutcome> {
        let fractal = request.fractal();
        let parameters = fractal.parameters().snapshot();

        match fractal.strategy() {
            RenderStrategy::Cpu(formula) => render_escape_time(
                *formula,
                &parameters,
                fractal.palette().as_ref(),
                request.dimensions(),
                &self.config,
                cancel,
            )
            .map_err(|e| match e {
                EscapeTimeRenderError::Cancelled(_) => RenderOutcome::Cancelled,
                other => RenderOutcome::Error(other.to_string()),
            }),
            RenderStrategy::Gpu(shaders) => {
                let palette = fractal.palette().colours();
                let frame = GpuFrame {
                    dimensions: request.dimensions(),
                    shaders,
                    palette: &palette,
                    parameters: &parameters,
                };

                self.gpu.render(&frame, cancel).map_err(|e| match e {
                    GpuRenderError::Cancelled(_) => RenderOutcome::Cancelled,
                    other => RenderOutcome::Error(other.to_string()),
                })
            }
        }
    }
}

#[cfg(feature = "gpu")]
fn default_surface_factory() -> SurfaceFactory {
    crate::core::gpu::wgpu_surface::WgpuSurface::factory()
}

#[cfg(not(feature = "gpu"))]
fn default_surface_factory() -> SurfaceFactory {
    use crate::core::gpu::errors::SurfaceError;
    use crate::core::gpu::surface::OffscreenSurface;

    Box::new(|| -> Result<Box<dyn OffscreenSurface>, SurfaceError> {
        Err(SurfaceError::Unavailable(
            "built without the `gpu` feature".to_owned(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::{CancellationToken, NeverCancel};
    use crate::core::data::dimensions::Dimensions;
    use crate::core::data::parameter_map::ParameterMap;
    use crate::core::fractals::escape_time::formula::EscapeTimeFormula;
    use crate::core::fractals::fractal::Fractal;
    use crate::core::fractals::strategy::ShaderSource;
    use crate::core::gpu::errors::SurfaceError;
    use crate::core::gpu::surface::OffscreenSurface;
    use std::sync::Arc;

    fn unavailable() -> SurfaceFactory {
        Box::new(|| -> Result<Box<dyn OffscreenSurface>, SurfaceError> {
            Err(SurfaceError::Unavailable("test".to_owned()))
        })
    }

    fn cpu_request() -> RenderRequest {
        let params: ParameterMap = [("centerX", -0.5), ("centerY", 0.0), ("scale", 1.0)]
            .into_iter()
            .collect();
        let fractal = Fractal::new(
            "mandelbrot",
            RenderStrategy::Cpu(EscapeTimeFormula::Mandelbrot),
            params,
            None,
            None,
        )
        .unwrap();
        RenderRequest::new(1, Arc::new(fractal), Dimensions::new(12, 9).unwrap())
    }

    #[test]
    fn test_cpu_fractal_renders_requested_size() {
        let mut renderer = StrategyRenderer::with_surface_factory(EngineConfig::default(), unavailable());
        let request = cpu_request();

        let pixels = renderer.render(&request, &NeverCancel).unwrap();

        assert_eq!(pixels.dimensions(), request.dimensions());
    }

    #[test]
    fn test_cancelled_cpu_render_maps_to_cancelled() {
        let mut renderer = StrategyRenderer::with_surface_factory(EngineConfig::default(), unavailable());
        let token = CancellationToken::new();
        token.cancel();

        let result = renderer.render(&cpu_request(), &token);

        assert_eq!(result.unwrap_err(), RenderOutcome::Cancelled);
    }

    #[test]
    fn test_gpu_failure_is_reported_as_error() {
        let mut renderer = StrategyRenderer::with_surface_factory(EngineConfig::default(), unavailable());
        let fractal = Fractal::new(
            "shader",
            RenderStrategy::Gpu(ShaderSource::new("vs", "fs")),
            ParameterMap::new(),
            None,
            None,
        )
        .unwrap();
        let request = RenderRequest::new(1, Arc::new(fractal), Dimensions::new(4, 4).unwrap());

        let result = renderer.render(&request, &NeverCancel);

        assert!(matches!(result, Err(RenderOutcome::Error(message)) if message.contains("unavailable")));
    }
}
