use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::PixelBuffer;

/// A finished render, tagged with the fractal that produced it.
///
/// Bitmaps are never mutated after construction; they are shared as `Arc<Bitmap>`
/// between the render cache and whoever is displaying or exporting them.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    fractal: String,
    version: u64,
    buffer: PixelBuffer,
}

impl Bitmap {
    #[must_use]
    pub fn new(fractal: impl Into<String>, version: u64, buffer: PixelBuffer) -> Self {
        Self {
            fractal: fractal.into(),
            version,
            buffer,
        }
    }

    #[must_use]
    pub fn fractal(&self) -> &str {
        &self.fractal
    }

    /// Generation of the render request that produced this bitmap.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.buffer.dimensions()
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.buffer.dimensions().width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.buffer.dimensions().height()
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        self.buffer.pixels()
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}
