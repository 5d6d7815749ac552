use {
    crate::*,
    image::{Image, PixelFormat, jpeg_to_rgb, nv21_len, nv21_to_rgb, rgb_to_jpeg, yuv::chroma_size},
};

// JPEG quality used by the codec round trip when none is given
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// How a YUV frame is turned into RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fixed-point BT.601 conversion straight from NV21.
    #[default]
    Direct,
    /// NV21 to RGB, then through a JPEG encode/decode at `quality`.
    JpegRoundTrip { quality: u8 },
}

impl DecodeMode {
    pub fn jpeg() -> Self {
        DecodeMode::JpegRoundTrip {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

fn short_plane(name: &str) -> VideoError {
    VideoError::Decode(image::ImageError::Dimensions(format!(
        "{name} plane too short for frame"
    )))
}

impl RawFrame {
    /// Packs the Y, U and V planes into a tight NV21 buffer.
    ///
    /// Only `PixelFormat::Yuv420` frames with exactly three planes are
    /// accepted; anything else is rejected rather than guessed at. Plane
    /// extents are checked before any buffer is allocated.
    pub fn to_nv21(&self) -> Result<Vec<u8>, VideoError> {
        if self.format != PixelFormat::Yuv420 {
            return Err(VideoError::UnsupportedFormat(self.format));
        }
        let [y_plane, u_plane, v_plane] = self.planes.as_slice() else {
            return Err(VideoError::Decode(image::ImageError::Dimensions(format!(
                "YUV 4:2:0 frame needs 3 planes, got {}",
                self.planes.len()
            ))));
        };

        let (width, height) = (self.size.x, self.size.y);
        let chroma = chroma_size(self.size);
        if !y_plane.covers(width, height) {
            return Err(short_plane("Y"));
        }
        if !u_plane.covers(chroma.x, chroma.y) {
            return Err(short_plane("U"));
        }
        if !v_plane.covers(chroma.x, chroma.y) {
            return Err(short_plane("V"));
        }
        let len = nv21_len(self.size).ok_or_else(|| short_plane("Y"))?;
        let mut nv21 = Vec::with_capacity(len);

        for row in 0..height {
            if y_plane.pixel_stride == 1 {
                nv21.extend_from_slice(y_plane.row(row, width).ok_or_else(|| short_plane("Y"))?);
            } else {
                for col in 0..width {
                    nv21.push(y_plane.sample(col, row).ok_or_else(|| short_plane("Y"))?);
                }
            }
        }

        for row in 0..chroma.y {
            for col in 0..chroma.x {
                let v = v_plane.sample(col, row).ok_or_else(|| short_plane("V"))?;
                let u = u_plane.sample(col, row).ok_or_else(|| short_plane("U"))?;
                nv21.push(v);
                nv21.push(u);
            }
        }

        Ok(nv21)
    }

    /// Converts the frame into an RGB raster of the same size.
    pub fn decode(&self, mode: DecodeMode) -> Result<Image, VideoError> {
        let nv21 = self.to_nv21()?;
        let rgb = Image::rgb(self.size, nv21_to_rgb(self.size, &nv21)?)?;
        match mode {
            DecodeMode::Direct => Ok(rgb),
            DecodeMode::JpegRoundTrip { quality } => {
                let jpeg = rgb_to_jpeg(&rgb, quality)?;
                Ok(jpeg_to_rgb(&jpeg)?)
            }
        }
    }
}
