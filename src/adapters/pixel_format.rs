//! Pixel format conversion helpers for presentation adapters.

use crate::core::data::colour::Colour;

/// Copies packed ARGB pixels into an RGBA byte frame. Alpha is forced to 255
/// so interior pixels of palettes with a transparent first entry still show.
///
/// # Panics
/// Panics if `dst.len() != src.len() * 4`.
pub fn copy_argb_to_rgba(src: &[u32], dst: &mut [u8]) {
    assert_eq!(
        dst.len(),
        src.len() * 4,
        "dst length {} does not match expected {}",
        dst.len(),
        src.len() * 4
    );

    for (&argb, dst_pixel) in src.iter().zip(dst.chunks_exact_mut(4)) {
        let [r, g, b, _] = Colour::from_argb(argb).to_rgba_bytes();
        dst_pixel.copy_from_slice(&[r, g, b, 255]);
    }
}

/// Fills an RGBA frame with opaque black.
pub fn clear_rgba(dst: &mut [u8]) {
    for pixel in dst.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[0, 0, 0, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_argb_to_rgba_known_values() {
        let src = vec![0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF, 0x0000_0000];
        let mut dst = vec![0; src.len() * 4];

        copy_argb_to_rgba(&src, &mut dst);

        assert_eq!(
            dst,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 0, 0, 0, 255]
        );
    }

    #[test]
    fn test_copy_argb_to_rgba_empty_buffers() {
        let mut dst: Vec<u8> = vec![];

        copy_argb_to_rgba(&[], &mut dst);

        assert!(dst.is_empty());
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_copy_argb_to_rgba_rejects_short_frame() {
        let mut dst = vec![0; 4];

        copy_argb_to_rgba(&[0, 0], &mut dst);
    }

    #[test]
    fn test_clear_rgba_is_opaque_black() {
        let mut dst = vec![7; 8];

        clear_rgba(&mut dst);

        assert_eq!(dst, vec![0, 0, 0, 255, 0, 0, 0, 255]);
    }
}
