use crate::core::fractals::escape_time::formula::EscapeTimeFormula;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Cpu,
    Gpu,
}

impl StrategyKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        }
    }
}

/// Vertex and fragment shader text, already loaded by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.vertex.trim().is_empty() && !self.fragment.trim().is_empty()
    }
}

/// How a fractal produces a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderStrategy {
    Cpu(EscapeTimeFormula),
    Gpu(ShaderSource),
}

impl RenderStrategy {
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Cpu(_) => StrategyKind::Cpu,
            Self::Gpu(_) => StrategyKind::Gpu,
        }
    }

    #[must_use]
    pub fn shader_source(&self) -> Option<&ShaderSource> {
        match self {
            Self::Cpu(_) => None,
            Self::Gpu(shaders) => Some(shaders),
        }
    }
}
