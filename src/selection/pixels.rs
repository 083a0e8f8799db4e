//! Read-only pixel access over a borrowed image.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - read as (v, v, v, 255)
//! - **RGB**: (height, width, 3) - read as (r, g, b, 255)
//! - **RGBA**: (height, width, 4) - read as-is
//!
//! Canvas `ImageData` style flat RGBA bytes can be wrapped with
//! [`PixelBuffer::from_raw`].

use ndarray::ArrayView3;

use crate::error::{SegmentError, SegmentResult};

/// A single RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Mean of the three color channels, alpha ignored.
    #[inline]
    pub fn brightness(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }

    /// Sum of absolute differences over all four channels.
    #[inline]
    pub fn manhattan_distance(&self, other: &Pixel) -> u32 {
        let dr = (self.r as i32 - other.r as i32).unsigned_abs();
        let dg = (self.g as i32 - other.g as i32).unsigned_abs();
        let db = (self.b as i32 - other.b as i32).unsigned_abs();
        let da = (self.a as i32 - other.a as i32).unsigned_abs();
        dr + dg + db + da
    }
}

/// Borrowed image of shape (height, width, channels).
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    view: ArrayView3<'a, u8>,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap an image array with 1, 3 or 4 channels.
    pub fn new(view: ArrayView3<'a, u8>) -> SegmentResult<Self> {
        let (height, width, channels) = view.dim();
        if width == 0 || height == 0 {
            return Err(SegmentError::EmptyImage { width, height });
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(SegmentError::UnsupportedChannels(channels));
        }
        Ok(Self { view })
    }

    /// Wrap flat RGBA bytes (length = width * height * 4).
    pub fn from_raw(data: &'a [u8], width: usize, height: usize) -> SegmentResult<Self> {
        if width == 0 || height == 0 {
            return Err(SegmentError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(SegmentError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let view = ArrayView3::from_shape((height, width, 4), data).map_err(|_| {
            SegmentError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            }
        })?;
        Self::new(view)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.view.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.view.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.view.dim().2
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false; empty images are rejected on construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Fail with [`SegmentError::OutOfBounds`] unless (x, y) is inside the image.
    pub fn check_bounds(&self, x: usize, y: usize) -> SegmentResult<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(SegmentError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Read the pixel at (x, y). Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        let v = &self.view;
        match self.channels() {
            1 => {
                let l = v[[y, x, 0]];
                Pixel::new(l, l, l, 255)
            }
            3 => Pixel::new(v[[y, x, 0]], v[[y, x, 1]], v[[y, x, 2]], 255),
            _ => Pixel::new(v[[y, x, 0]], v[[y, x, 1]], v[[y, x, 2]], v[[y, x, 3]]),
        }
    }

    pub fn view(&self) -> ArrayView3<'a, u8> {
        self.view
    }
}
