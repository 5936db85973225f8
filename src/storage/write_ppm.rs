use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::data::bitmap::Bitmap;

/// Writes `bitmap` as a binary PPM (P6). Alpha is dropped.
pub fn write_ppm(bitmap: &Bitmap, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filepath)?);
    encode_ppm(bitmap, &mut file)?;
    file.flush()
}

pub fn encode_ppm(bitmap: &Bitmap, out: &mut impl Write) -> std::io::Result<()> {
    // P6: binary RGB, then width height max_colour
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", bitmap.width(), bitmap.height())?;
    writeln!(out, "255")?;
    out.write_all(&bitmap.buffer().to_rgb_bytes())
}
