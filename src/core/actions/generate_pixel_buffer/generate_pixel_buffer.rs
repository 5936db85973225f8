use std::error::Error;
use std::fmt;

use crate::core::actions::cancellation::{CancelToken, Cancelled, CANCEL_CHECK_INTERVAL_PIXELS};
use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::palettes::ColourPalette;

#[derive(Debug)]
pub enum GeneratePixelBufferError {
    Cancelled(Cancelled),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<PixelBufferError> for GeneratePixelBufferError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Maps row-major intensities through `palette` into a pixel buffer.
///
/// Checks `cancel` every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels.
pub fn generate_pixel_buffer<C>(
    intensities: &[f32],
    palette: &dyn ColourPalette,
    dimensions: Dimensions,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    C: CancelToken + ?Sized,
{
    let mut buffer: PixelBufferData = Vec::with_capacity(intensities.len());

    for (i, &intensity) in intensities.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(GeneratePixelBufferError::Cancelled(Cancelled));
        }

        buffer.push(palette.colour_at(intensity));
    }

    Ok(PixelBuffer::from_data(dimensions, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::palettes::grayscale::GrayscalePalette;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_generates_pixel_buffer_correctly() {
        let dimensions = Dimensions::new(2, 2).unwrap();
        let intensities = [0.0, 1.0, 1.0, 0.0];

        let buffer =
            generate_pixel_buffer(&intensities, &GrayscalePalette, dimensions, &NeverCancel)
                .unwrap();

        assert_eq!(
            buffer.pixels(),
            &[0xff00_0000, 0xffff_ffff, 0xffff_ffff, 0xff00_0000]
        );
        assert_eq!(buffer.dimensions(), dimensions);
    }

    #[test]
    fn test_size_mismatch_returns_err() {
        let dimensions = Dimensions::new(2, 2).unwrap();
        let intensities = [0.0; 6];

        let result =
            generate_pixel_buffer(&intensities, &GrayscalePalette, dimensions, &NeverCancel);

        assert!(matches!(
            result,
            Err(GeneratePixelBufferError::PixelBuffer(
                PixelBufferError::BoundsMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_returns_cancelled_when_token_is_cancelled() {
        let dimensions = Dimensions::new(3, 2).unwrap();
        let intensities = [0.5; 6];
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result =
            generate_pixel_buffer(&intensities, &GrayscalePalette, dimensions, &cancel_token);

        assert!(matches!(result, Err(GeneratePixelBufferError::Cancelled(_))));
    }

    #[test]
    fn test_error_displays_cancelled() {
        let err = GeneratePixelBufferError::Cancelled(Cancelled);
        assert_eq!(format!("{}", err), "render cancelled");
    }
}
