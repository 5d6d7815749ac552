use {
    base::Vec2,
    image::PixelFormat,
    std::{fmt, time::Duration},
};

/// One sample plane of a raw frame.
///
/// Sample `(x, y)` lives at `y * row_stride + x * pixel_stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl Plane {
    /// Tightly packed plane (`pixel_stride` 1, no row padding).
    pub fn packed(data: Vec<u8>, width: usize) -> Self {
        Self {
            data,
            row_stride: width,
            pixel_stride: 1,
        }
    }

    /// Whether `data` holds every sample of a `width x height` region, with
    /// rows that do not overlap. All arithmetic is checked.
    pub fn covers(&self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            return true;
        }
        if width > 1 && self.pixel_stride == 0 {
            return false;
        }
        let Some(row_span) = (width - 1)
            .checked_mul(self.pixel_stride)
            .and_then(|span| span.checked_add(1))
        else {
            return false;
        };
        if height > 1 && self.row_stride < row_span {
            return false;
        }
        (height - 1)
            .checked_mul(self.row_stride)
            .and_then(|offset| offset.checked_add(row_span))
            .is_some_and(|len| len <= self.data.len())
    }

    pub fn sample(&self, x: usize, y: usize) -> Option<u8> {
        self.data
            .get(y * self.row_stride + x * self.pixel_stride)
            .copied()
    }

    /// Row `y` of a plane with `pixel_stride` 1, without trailing padding.
    pub fn row(&self, y: usize, width: usize) -> Option<&[u8]> {
        let start = y * self.row_stride;
        self.data.get(start..start + width)
    }
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// A single camera capture in its native multi-plane encoding.
///
/// The capture subsystem may attach a release hook with `with_release`; it
/// runs exactly once, when the frame is dropped, whatever path the frame
/// took through the consumer.
pub struct RawFrame {
    pub timestamp: Duration,
    pub size: Vec2<usize>,
    pub format: PixelFormat,
    pub planes: Vec<Plane>,
    release: Option<ReleaseHook>,
}

impl RawFrame {
    pub fn new(
        timestamp: Duration,
        size: Vec2<usize>,
        format: PixelFormat,
        planes: Vec<Plane>,
    ) -> Self {
        Self {
            timestamp,
            size,
            format,
            planes,
            release: None,
        }
    }

    /// Planar YUV 4:2:0 frame from tightly packed Y, U and V planes.
    pub fn yuv420(
        timestamp: Duration,
        size: Vec2<usize>,
        y: Vec<u8>,
        u: Vec<u8>,
        v: Vec<u8>,
    ) -> Self {
        let chroma_width = size.x.div_ceil(2);
        Self::new(
            timestamp,
            size,
            PixelFormat::Yuv420,
            vec![
                Plane::packed(y, size.x),
                Plane::packed(u, chroma_width),
                Plane::packed(v, chroma_width),
            ],
        )
    }

    /// Frame with the same luma everywhere and neutral chroma.
    pub fn uniform(timestamp: Duration, size: Vec2<usize>, luma: u8) -> Self {
        let chroma = size.x.div_ceil(2) * size.y.div_ceil(2);
        Self::yuv420(
            timestamp,
            size,
            vec![luma; size.area()],
            vec![128; chroma],
            vec![128; chroma],
        )
    }

    pub fn with_release(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFrame")
            .field("timestamp", &self.timestamp)
            .field("size", &self.size)
            .field("format", &self.format)
            .field("planes", &self.planes.len())
            .field("release", &self.release.is_some())
            .finish()
    }
}

impl Drop for RawFrame {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
