use {crate::*, base::Vec2};

fn rgb_len(size: Vec2<usize>) -> Result<usize, ImageError> {
    size.checked_area()
        .and_then(|area| area.checked_mul(3))
        .ok_or_else(|| ImageError::Dimensions(format!("RGB raster of {size} is too large")))
}

/// Owned pixel buffer tagged with its pixel format.
///
/// For `Rgb8` the buffer holds `size.x * size.y * 3` bytes, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Build an RGB raster, checking the buffer length against `size`.
    pub fn rgb(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = rgb_len(size)?;
        if data.len() != expected {
            return Err(ImageError::Dimensions(format!(
                "RGB buffer for {size} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self::new(size, data, PixelFormat::Rgb8))
    }

    /// RGB raster where every pixel has the same color.
    pub fn filled(size: Vec2<usize>, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(size.area());
        Self::new(size, data, PixelFormat::Rgb8)
    }

    /// Checks that this is an `Rgb8` raster whose buffer covers its size.
    pub fn ensure_rgb(&self) -> Result<(), ImageError> {
        self.format.ensure_format(PixelFormat::Rgb8)?;
        if self.data.len() != rgb_len(self.size)? {
            return Err(ImageError::Dimensions(format!(
                "RGB buffer of {} bytes does not cover {}",
                self.data.len(),
                self.size
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// RGB triple at `(x, y)`, or `None` outside the raster or for non-RGB images.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if self.format != PixelFormat::Rgb8 || x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        self.data.get(i..i + 3).map(|p| [p[0], p[1], p[2]])
    }
}
