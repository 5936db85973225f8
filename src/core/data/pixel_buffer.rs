use crate::core::data::colour::Colour;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        dimensions: Dimensions,
    },
    BoundsMismatch {
        expected_pixels: usize,
        buffer_pixels: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                expected_pixels,
                buffer_pixels,
            } => {
                write!(
                    f,
                    "surface holds {} pixels but buffer holds {}",
                    expected_pixels, buffer_pixels
                )
            }
            Self::PixelOutsideBounds { pixel, dimensions } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} surface",
                    pixel.x,
                    pixel.y,
                    dimensions.width(),
                    dimensions.height()
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// Row-major packed ARGB pixels, top row first.
pub type PixelBufferData = Vec<u32>;

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    pixels: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            pixels: vec![Colour::BLACK.to_argb(); dimensions.pixel_count()],
        }
    }

    pub fn from_data(
        dimensions: Dimensions,
        pixels: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        if dimensions.pixel_count() != pixels.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_pixels: dimensions.pixel_count(),
                buffer_pixels: pixels.len(),
            });
        }

        Ok(Self { dimensions, pixels })
    }

    /// Builds a buffer from tightly packed RGBA bytes, as read back from a GPU texture.
    pub fn from_rgba_bytes(dimensions: Dimensions, bytes: &[u8]) -> Result<Self, PixelBufferError> {
        if bytes.len() != dimensions.pixel_count() * 4 {
            return Err(PixelBufferError::BoundsMismatch {
                expected_pixels: dimensions.pixel_count(),
                buffer_pixels: bytes.len() / 4,
            });
        }

        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Colour::from_rgba_bytes([px[0], px[1], px[2], px[3]]).to_argb())
            .collect();

        Ok(Self { dimensions, pixels })
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour::from_argb(self.pixels[index]))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;
        self.pixels[index] = colour.to_argb();

        Ok(())
    }

    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);

        for &argb in &self.pixels {
            let Colour { r, g, b, .. } = Colour::from_argb(argb);
            bytes.extend_from_slice(&[r, g, b]);
        }

        bytes
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.dimensions.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                dimensions: self.dimensions,
            });
        }

        Ok(pixel.y as usize * self.dimensions.width() as usize + pixel.x as usize)
    }
}
