use crate::core::data::colour::Colour;
use crate::core::palettes::palette::{ColourPalette, PaletteKind};

const TABLE_SIZE: usize = 256;

/// Identity mapping used when a fractal has no palette of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscalePalette;

impl ColourPalette for GrayscalePalette {
    fn colour_at(&self, intensity: f32) -> u32 {
        let level = if intensity.is_nan() {
            0
        } else {
            (intensity.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        Colour::opaque(level, level, level).to_argb()
    }

    fn colours(&self) -> Vec<u32> {
        (0..TABLE_SIZE)
            .map(|i| self.colour_at(i as f32 / (TABLE_SIZE - 1) as f32))
            .collect()
    }

    fn kind(&self) -> PaletteKind {
        PaletteKind::Grayscale
    }
}
