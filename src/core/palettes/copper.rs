use crate::core::data::colour::OPAQUE_ALPHA;
use crate::core::palettes::errors::PaletteError;
use crate::core::palettes::palette::{table_index, ColourPalette, PaletteKind};

pub const DEFAULT_COPPER_SIZE: usize = 256;

/// Black through deep copper to a warm highlight. Entry 0 is transparent
/// black so escaped-at-once pixels fade into the background.
#[derive(Debug, Clone)]
pub struct CopperPalette {
    table: Vec<u32>,
}

impl CopperPalette {
    pub fn new(size: usize) -> Result<Self, PaletteError> {
        if size == 0 {
            return Err(PaletteError::EmptyTable);
        }

        let ln_size = (size as f64).ln();
        let mut table = Vec::with_capacity(size);
        table.push(0);

        for i in 1..size {
            let i = i as f64;
            // ln(1) is 0, so a single-entry table never reaches this loop.
            let level = ((i.ln() / ln_size + (-i).exp()) * 255.0) as i64 as u32 & 0xff;
            table.push(OPAQUE_ALPHA | level << 16 | (level / 2) << 8);
        }

        Ok(Self { table })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for CopperPalette {
    fn default() -> Self {
        Self::new(DEFAULT_COPPER_SIZE).unwrap_or_else(|_| Self { table: vec![0] })
    }
}

impl ColourPalette for CopperPalette {
    fn colour_at(&self, intensity: f32) -> u32 {
        self.table[table_index(intensity, self.table.len())]
    }

    fn colours(&self) -> Vec<u32> {
        self.table.clone()
    }

    fn kind(&self) -> PaletteKind {
        PaletteKind::Copper
    }
}
