//! Raster images and pixel conversions for the classifier pipeline.
//!
//! Camera frames arrive as YUV 4:2:0 and leave this crate as interleaved
//! RGB rasters or as normalized `Tensor<f32>` in NHWC layout
//! `[1, height, width, 3]`, ready for a classifier.
//!
//! The heavy lifting (JPEG codec, bilinear resampling) is delegated to the
//! `image` crate, imported here as `crates_image`.

pub mod error;
pub mod image;
pub mod jpeg;
pub mod pixelformat;
pub mod preprocess;
pub mod yuv;

pub use error::ImageError;
pub use image::Image;
pub use jpeg::{jpeg_to_rgb, rgb_to_jpeg};
pub use pixelformat::PixelFormat;
pub use preprocess::{center_crop_square, prepare, resize, to_tensor};
pub use yuv::{nv21_len, nv21_to_rgb};
