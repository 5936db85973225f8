/// Bytes per row once rounded up to the copy alignment.
#[must_use]
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32, alignment: u32) -> u32 {
    let unpadded = width * bytes_per_pixel;
    unpadded.div_ceil(alignment) * alignment
}

/// Strips per-row padding from a texture-to-buffer copy.
#[must_use]
pub fn unpad_rows(data: &[u8], row_bytes: usize, padded_row_bytes: usize, rows: usize) -> Vec<u8> {
    let mut packed = Vec::with_capacity(row_bytes * rows);

    for row in data.chunks(padded_row_bytes).take(rows) {
        packed.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }

    packed
}
