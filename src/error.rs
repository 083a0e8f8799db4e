//! Error types for segmentation operations.
//!
//! Only malformed input is an error. A click that finds no usable region,
//! a trace that yields no contour, or a scan with nothing enclosed are
//! reported through `Option` / empty results instead.

use thiserror::Error;

/// Result type for segmentation operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Errors that can occur during segmentation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SegmentError {
    /// The image has no pixels.
    #[error("image is empty ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// A requested coordinate lies outside the image.
    #[error("point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        /// Requested X coordinate.
        x: i64,
        /// Requested Y coordinate.
        y: i64,
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// A pointer coordinate was NaN or infinite.
    #[error("coordinate ({x}, {y}) is not a finite number")]
    InvalidCoordinate {
        /// Requested X coordinate.
        x: f64,
        /// Requested Y coordinate.
        y: f64,
    },

    /// The image has a channel count other than 1, 3 or 4.
    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    /// A flat pixel buffer does not match the declared dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Byte count implied by width, height and channel count.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// A mask does not have the dimensions of the image it is applied to.
    #[error("mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    MaskSizeMismatch {
        /// Mask width.
        mask_width: usize,
        /// Mask height.
        mask_height: usize,
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },
}

