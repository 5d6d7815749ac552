use {
    crate::*,
    base::Vec2,
    crates_image::{ExtendedColorType, ImageEncoder, ImageFormat, codecs::jpeg::JpegEncoder},
};

/// Encodes an RGB raster as JPEG bytes (`quality` 1-100, higher is better).
pub fn rgb_to_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    image.ensure_rgb()?;
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &image.data,
            image.size.x as u32,
            image.size.y as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decodes JPEG bytes into an RGB raster.
pub fn jpeg_to_rgb(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory_with_format(data, ImageFormat::Jpeg)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Image::rgb(Vec2::new(width as usize, height as usize), rgb.into_raw())
}
