//! Vehicle silhouette masks.
//!
//! The vehicle itself is split into many panels by its outline strokes, so
//! it cannot be flood filled as one region. The background can: it is
//! filled from a known background pixel and everything it does not reach is
//! treated as the vehicle.

use log::debug;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use super::color_match::ColorMatcher;
use super::config::SegmentationConfig;
use super::flood_fill::{flood_fill, VisitedMask};
use super::pixels::PixelBuffer;
use crate::error::{SegmentError, SegmentResult};

/// Fill the background from `config.background_seed`.
pub fn background_fill(
    buffer: &PixelBuffer<'_>,
    config: &SegmentationConfig,
) -> SegmentResult<VisitedMask> {
    let (x, y) = config
        .background_seed
        .resolve(buffer.width(), buffer.height());
    buffer.check_bounds(x, y)?;

    let matcher = ColorMatcher::new(buffer.pixel(x, y), config.background_tolerance, config);
    let fill = flood_fill(buffer, x, y, &matcher, None);
    debug!(
        "background fill from ({}, {}): {} of {} pixels",
        x,
        y,
        fill.pixel_count,
        buffer.len()
    );
    Ok(fill.visited)
}

/// Opacity mask of shape (height, width): 0 on background, 255 on the vehicle.
pub fn create_background_mask(
    buffer: &PixelBuffer<'_>,
    config: &SegmentationConfig,
) -> SegmentResult<Array2<u8>> {
    let background = background_fill(buffer, config)?;
    let mut mask = Array2::<u8>::zeros((buffer.height(), buffer.width()));

    for ((y, x), value) in mask.indexed_iter_mut() {
        if !background.get(x, y) {
            *value = 255;
        }
    }

    Ok(mask)
}

/// RGBA cover of shape (height, width, 4): opaque white on background,
/// fully transparent on the vehicle.
///
/// Drawn above a full-body wrap image, this hides whatever the wrap paints
/// outside the vehicle outline.
pub fn create_white_background_cover(
    buffer: &PixelBuffer<'_>,
    config: &SegmentationConfig,
) -> SegmentResult<Array3<u8>> {
    let background = background_fill(buffer, config)?;
    let mut cover = Array3::<u8>::zeros((buffer.height(), buffer.width(), 4));

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if background.get(x, y) {
                for c in 0..4 {
                    cover[[y, x, c]] = 255;
                }
            }
        }
    }

    Ok(cover)
}

/// Clip an RGBA image to a mask by scaling its alpha.
///
/// # Arguments
/// * `image` - RGBA image of shape (height, width, 4)
/// * `mask` - Opacity mask of shape (height, width), 255 = keep
pub fn apply_mask_alpha(image: ArrayView3<u8>, mask: ArrayView2<u8>) -> SegmentResult<Array3<u8>> {
    let (height, width, channels) = image.dim();
    if channels != 4 {
        return Err(SegmentError::UnsupportedChannels(channels));
    }
    let (mask_height, mask_width) = mask.dim();
    if (mask_height, mask_width) != (height, width) {
        return Err(SegmentError::MaskSizeMismatch {
            mask_width,
            mask_height,
            width,
            height,
        });
    }

    let mut output = image.to_owned();
    for y in 0..height {
        for x in 0..width {
            let alpha = output[[y, x, 3]] as u32 * mask[[y, x]] as u32;
            output[[y, x, 3]] = ((alpha + 127) / 255) as u8;
        }
    }

    Ok(output)
}
