use log::{debug, warn};

use crate::core::actions::cancellation::CancelToken;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::ParameterMap;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::strategy::ShaderSource;
use crate::core::gpu::errors::{GpuRenderError, SurfaceError};
use crate::core::gpu::surface::{OffscreenSurface, SurfaceFactory};
use crate::core::gpu::uniforms::{UniformBlock, MAX_SHADER_PARAMETERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuState {
    Idle,
    Initializing,
    Rendering,
    ReadingBack,
    Complete,
}

/// Inputs for one shader-rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct GpuFrame<'a> {
    pub dimensions: Dimensions,
    pub shaders: &'a ShaderSource,
    pub palette: &'a [u32],
    pub parameters: &'a ParameterMap,
}

/// What the surface was last initialised for.
#[derive(Debug, Clone, PartialEq)]
struct SurfaceSetup {
    dimensions: Dimensions,
    shaders: ShaderSource,
    palette: Vec<u32>,
}

impl SurfaceSetup {
    fn matches(&self, frame: &GpuFrame<'_>) -> bool {
        self.dimensions == frame.dimensions
            && &self.shaders == frame.shaders
            && self.palette == frame.palette
    }
}

/// Drives one off-screen surface through
/// Idle → Initializing → Rendering → ReadingBack → Complete.
///
/// Initialisation is repeated only when the size, program or palette
/// changes. A lost surface is rebuilt and the frame retried once.
pub struct GpuRenderer {
    factory: SurfaceFactory,
    surface: Option<Box<dyn OffscreenSurface>>,
    setup: Option<SurfaceSetup>,
    state: GpuState,
}

impl GpuRenderer {
    #[must_use]
    pub fn new(factory: SurfaceFactory) -> Self {
        Self {
            factory,
            surface: None,
            setup: None,
            state: GpuState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> GpuState {
        self.state
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.setup.is_some()
    }

    pub fn render<C>(&mut self, frame: &GpuFrame<'_>, cancel: &C) -> Result<PixelBuffer, GpuRenderError>
    where
        C: CancelToken + ?Sized,
    {
        match self.render_once(frame, cancel) {
            Err(GpuRenderError::Surface(SurfaceError::Lost)) => {
                warn!("rendering surface lost, re-initialising");
                self.invalidate();
                let retried = self.render_once(frame, cancel);
                if matches!(retried, Err(GpuRenderError::Surface(SurfaceError::Lost))) {
                    self.invalidate();
                }
                retried
            }
            result => result,
        }
    }

    /// Tears down the surface; the next frame starts from Initializing.
    pub fn invalidate(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.release();
        }
        self.surface = None;
        self.setup = None;
        self.transition(GpuState::Idle);
    }

    fn render_once<C>(&mut self, frame: &GpuFrame<'_>, cancel: &C) -> Result<PixelBuffer, GpuRenderError>
    where
        C: CancelToken + ?Sized,
    {
        self.transition(GpuState::Idle);
        self.abort_if_cancelled(cancel)?;

        if !self.setup.as_ref().is_some_and(|setup| setup.matches(frame)) {
            self.transition(GpuState::Initializing);
            if let Err(err) = self.initialize(frame) {
                self.invalidate();
                return Err(err.into());
            }
            self.abort_if_cancelled(cancel)?;
        }

        if frame.parameters.len() > MAX_SHADER_PARAMETERS {
            warn!(
                "{} parameters exceed the shader limit of {}; extra values are ignored",
                frame.parameters.len(),
                MAX_SHADER_PARAMETERS
            );
        }
        let uniforms = UniformBlock::pack(frame.dimensions, frame.parameters);

        self.transition(GpuState::Rendering);
        self.surface_mut()?.draw(&uniforms)?;
        self.abort_if_cancelled(cancel)?;

        self.transition(GpuState::ReadingBack);
        let pixels = self.surface_mut()?.read_back()?;
        self.abort_if_cancelled(cancel)?;

        self.transition(GpuState::Complete);
        Ok(pixels)
    }

    fn initialize(&mut self, frame: &GpuFrame<'_>) -> Result<(), SurfaceError> {
        if let Some(surface) = self.surface.as_mut() {
            surface.release();
        }
        self.setup = None;

        if self.surface.is_none() {
            self.surface = Some((self.factory)()?);
        }

        self.surface_mut()?
            .initialize(frame.dimensions, frame.shaders, frame.palette)?;

        self.setup = Some(SurfaceSetup {
            dimensions: frame.dimensions,
            shaders: frame.shaders.clone(),
            palette: frame.palette.to_vec(),
        });
        Ok(())
    }

    fn surface_mut(&mut self) -> Result<&mut Box<dyn OffscreenSurface>, SurfaceError> {
        self.surface
            .as_mut()
            .ok_or_else(|| SurfaceError::Unavailable("surface not initialised".to_owned()))
    }

    /// Cancelled frames return to Idle; the surface stays built for reuse.
    fn abort_if_cancelled<C>(&mut self, cancel: &C) -> Result<(), GpuRenderError>
    where
        C: CancelToken + ?Sized,
    {
        if let Err(cancelled) = cancel.check() {
            debug!("gpu frame cancelled in state {:?}", self.state);
            self.transition(GpuState::Idle);
            return Err(cancelled.into());
        }
        Ok(())
    }

    fn transition(&mut self, next: GpuState) {
        if self.state != next {
            debug!("gpu state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

impl Drop for GpuRenderer {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.release();
        }
    }
}
