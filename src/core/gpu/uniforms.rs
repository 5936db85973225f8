use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::ParameterMap;

pub const MAX_SHADER_PARAMETERS: usize = 64;

/// Layout of the uniform buffer at binding 0:
///
/// ```wgsl
/// struct Uniforms {
///     resolution: vec2<f32>,
///     surface: vec2<f32>,
///     parameter_count: u32,
///     _pad0: u32,
///     _pad1: u32,
///     _pad2: u32,
///     values: array<vec4<f32>, 16>,
/// }
/// ```
///
/// `resolution` is the shorter surface side on both axes; `surface` is the
/// real width and height. Parameter `k` sits in `values[k / 4][k % 4]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "gpu", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct UniformBlock {
    pub resolution: [f32; 2],
    pub surface: [f32; 2],
    pub parameter_count: u32,
    pub _pad: [u32; 3],
    pub values: [[f32; 4]; MAX_SHADER_PARAMETERS / 4],
}

impl UniformBlock {
    /// Packs parameters in insertion order. Entries past
    /// [`MAX_SHADER_PARAMETERS`] are dropped.
    #[must_use]
    pub fn pack(dimensions: Dimensions, parameters: &ParameterMap) -> Self {
        let side = dimensions.shorter_side() as f32;
        let mut values = [[0.0; 4]; MAX_SHADER_PARAMETERS / 4];
        let mut count = 0;

        for (k, (_, value)) in parameters.iter().take(MAX_SHADER_PARAMETERS).enumerate() {
            values[k / 4][k % 4] = value;
            count += 1;
        }

        Self {
            resolution: [side, side],
            surface: [dimensions.width() as f32, dimensions.height() as f32],
            parameter_count: count,
            _pad: [0; 3],
            values,
        }
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<f32> {
        if index >= self.parameter_count as usize {
            return None;
        }
        Some(self.values[index / 4][index % 4])
    }
}
