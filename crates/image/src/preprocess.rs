//! Geometric normalization and tensor encoding for classifier input.
//!
//! All functions are pure: they borrow an RGB raster and return a new one
//! (or a tensor), and give identical output for identical input.

use {
    crate::*,
    base::{Tensor, Vec2},
    crates_image::{ImageBuffer, Rgb, imageops::FilterType},
};

/// Crops the largest centered square out of an RGB raster.
///
/// `side = min(width, height)`; the crop origin is
/// `((width - side) / 2, (height - side) / 2)` using floor division.
pub fn center_crop_square(image: &Image) -> Result<Image, ImageError> {
    image.ensure_rgb()?;
    let (width, height) = (image.size.x, image.size.y);
    let side = width.min(height);
    if side == width && side == height {
        return Ok(image.clone());
    }

    let x0 = (width - side) / 2;
    let y0 = (height - side) / 2;
    let mut data = Vec::with_capacity(side * side * 3);
    for row in y0..y0 + side {
        let start = (row * width + x0) * 3;
        data.extend_from_slice(&image.data[start..start + side * 3]);
    }

    Image::rgb(Vec2::new(side, side), data)
}

/// Scales an RGB raster to exactly `side x side` with bilinear filtering.
///
/// # Errors
///
/// Returns `ImageError::Dimensions` for an empty source or a zero target.
pub fn resize(image: &Image, side: usize) -> Result<Image, ImageError> {
    image.ensure_rgb()?;
    if side == 0 || image.size.area() == 0 {
        return Err(ImageError::Dimensions(format!(
            "cannot resize {} to {side}x{side}",
            image.size
        )));
    }

    let source: ImageBuffer<Rgb<u8>, &[u8]> =
        ImageBuffer::from_raw(image.size.x as u32, image.size.y as u32, &image.data[..])
            .ok_or_else(|| ImageError::Dimensions(format!("bad RGB buffer for {}", image.size)))?;

    let resized =
        crates_image::imageops::resize(&source, side as u32, side as u32, FilterType::Triangle);
    Image::rgb(Vec2::new(side, side), resized.into_raw())
}

/// Encodes an RGB raster as `[1, height, width, 3]` floats in `[0, 1]`.
pub fn to_tensor(image: &Image) -> Result<Tensor<f32>, ImageError> {
    image.ensure_rgb()?;
    let data: Vec<f32> = image.data.iter().map(|&v| v as f32 / 255.0).collect();
    Ok(Tensor::new(vec![1, image.size.y, image.size.x, 3], data)?)
}

/// Crop, resize and encode in one go.
pub fn prepare(image: &Image, side: usize) -> Result<Tensor<f32>, ImageError> {
    let square = center_crop_square(image)?;
    let resized = resize(&square, side)?;
    to_tensor(&resized)
}
