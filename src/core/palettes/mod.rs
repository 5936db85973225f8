//! Colour palettes mapping a normalised intensity in [0, 1] to a packed ARGB colour.

pub mod copper;
pub mod errors;
pub mod factory;
pub mod grayscale;
pub mod palette;

pub use palette::{ColourPalette, PaletteKind};
