use std::sync::Arc;

use crate::core::palettes::copper::CopperPalette;
use crate::core::palettes::errors::PaletteError;
use crate::core::palettes::grayscale::GrayscalePalette;
use crate::core::palettes::palette::{ColourPalette, PaletteKind};

pub fn palette_factory(
    kind: PaletteKind,
    size: usize,
) -> Result<Arc<dyn ColourPalette>, PaletteError> {
    match kind {
        PaletteKind::Grayscale => Ok(Arc::new(GrayscalePalette)),
        PaletteKind::Copper => Ok(Arc::new(CopperPalette::new(size)?)),
    }
}
