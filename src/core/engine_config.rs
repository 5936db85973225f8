use std::time::Duration;

/// Engine-wide tuning shared by the strategies, the gesture controller and export.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Iteration bound for escape-time formulas. A fractal's `maxIterations`
    /// parameter overrides it.
    pub max_iterations: u32,
    /// Lookup-table size for table-backed palettes.
    pub palette_size: usize,
    /// Numerator of the drag factor; the factor is `touch_scale / min(width, height)`.
    pub touch_scale: f32,
    /// Span of the complex plane covered by the shorter surface side at scale 1.
    pub plane_span: f64,
    pub escape_radius_squared: f64,
    pub export_attempts: u32,
    pub export_retry_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            palette_size: 256,
            touch_scale: 1.5,
            plane_span: 3.0,
            escape_radius_squared: 4.0,
            export_attempts: 60,
            export_retry_interval: Duration::from_secs(1),
        }
    }
}
