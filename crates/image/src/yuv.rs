use {crate::*, base::Vec2};

// BT.601 full-range YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    (r, g, b)
}

/// Size of the chroma planes for a 4:2:0 frame (rounded up for odd sizes).
pub fn chroma_size(size: Vec2<usize>) -> Vec2<usize> {
    Vec2::new(size.x.div_ceil(2), size.y.div_ceil(2))
}

/// Number of bytes in a tightly packed NV21 buffer of the given size, or
/// `None` if that does not fit in a `usize`.
pub fn nv21_len(size: Vec2<usize>) -> Option<usize> {
    size.checked_area()?
        .checked_add(chroma_size(size).checked_area()?.checked_mul(2)?)
}

/// Converts NV21 (Y plane, then interleaved V/U pairs) to interleaved RGB.
///
/// Each 2x2 block of luma samples shares one V/U pair.
///
/// # Errors
///
/// Returns `ImageError::Dimensions` if `data` is shorter than `nv21_len(size)`
/// or the size overflows.
pub fn nv21_to_rgb(size: Vec2<usize>, data: &[u8]) -> Result<Vec<u8>, ImageError> {
    let expected = nv21_len(size)
        .ok_or_else(|| ImageError::Dimensions(format!("NV21 frame of {size} is too large")))?;
    if data.len() < expected {
        return Err(ImageError::Dimensions(format!(
            "NV21 buffer for {size} needs {expected} bytes, got {}",
            data.len()
        )));
    }

    let width = size.x;
    let uv_w = chroma_size(size).x;
    let (y_plane, vu_plane) = data.split_at(size.area());

    let mut rgb = Vec::with_capacity(size.area() * 3);
    for row in 0..size.y {
        let vu_row = (row / 2) * uv_w * 2;
        for col in 0..width {
            let vu = vu_row + (col / 2) * 2;
            let (r, g, b) = yuv_to_rgb(y_plane[row * width + col], vu_plane[vu + 1], vu_plane[vu]);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    Ok(rgb)
}
