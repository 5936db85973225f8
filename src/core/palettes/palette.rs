use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    Grayscale,
    Copper,
}

impl PaletteKind {
    pub const ALL: &'static [Self] = &[Self::Grayscale, Self::Copper];

    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Copper => "copper",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Copper => "Copper",
        }
    }

    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.identifier().eq_ignore_ascii_case(identifier))
    }
}

pub trait ColourPalette: Debug + Send + Sync {
    /// Colour for `intensity`. Total over all inputs: values outside [0, 1]
    /// (and NaN) clamp to the nearest end of the palette.
    fn colour_at(&self, intensity: f32) -> u32;

    /// The palette as a lookup table, lowest intensity first. Uploaded as a
    /// texture for shader-rendered fractals.
    fn colours(&self) -> Vec<u32>;

    fn kind(&self) -> PaletteKind;
}

/// Index into a table of `len` entries for `intensity`, clamped to the table.
#[must_use]
pub(crate) fn table_index(intensity: f32, len: usize) -> usize {
    if len == 0 || intensity.is_nan() || intensity <= 0.0 {
        return 0;
    }

    let index = (intensity * len as f32) as usize;
    index.min(len - 1)
}
