//! WebAssembly exports for panel segmentation.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat RGBA bytes, the layout of canvas `ImageData.data`.

use wasm_bindgen::prelude::*;

use crate::selection::{self, PixelBuffer, SegmentationConfig};

// ============================================================================
// Panel Detection
// ============================================================================

/// Detect the panel polygon under a click.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `x`, `y` - Pointer position in image pixels (floored)
/// * `tolerance` - Color tolerance (0-255, 40 is the usual value)
///
/// # Returns
/// Flat vertex list [x1, y1, x2, y2, ...]; empty when no panel was found
#[wasm_bindgen]
pub fn detect_region_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    tolerance: u8,
) -> Result<Vec<i32>, JsError> {
    let buffer = PixelBuffer::from_raw(data, width, height)?;
    let config = SegmentationConfig::default().with_tolerance(tolerance);
    let polygon = selection::detect_region_at(&buffer, x, y, &config)?;
    Ok(polygon.map(|p| p.to_flat()).unwrap_or_default())
}

/// Detect every enclosed panel.
///
/// # Returns
/// Flat array: [num_polygons, len1, x1, y1, x2, y2, ..., len2, ...]
#[wasm_bindgen]
pub fn detect_all_regions_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<i32>, JsError> {
    let buffer = PixelBuffer::from_raw(data, width, height)?;
    let polygons = selection::detect_all_regions(&buffer, &SegmentationConfig::default())?;
    Ok(selection::flatten_polygons(&polygons))
}

// ============================================================================
// Silhouette Masks
// ============================================================================

/// Vehicle opacity mask, one byte per pixel: 0 = background, 255 = vehicle.
#[wasm_bindgen]
pub fn create_background_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let buffer = PixelBuffer::from_raw(data, width, height)?;
    let mask = selection::create_background_mask(&buffer, &SegmentationConfig::default())?;
    Ok(mask.into_raw_vec_and_offset().0)
}

/// RGBA cover: opaque white on background, transparent on the vehicle.
///
/// # Returns
/// Flat array of RGBA bytes, ready for `new ImageData(...)`
#[wasm_bindgen]
pub fn create_white_background_cover_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let buffer = PixelBuffer::from_raw(data, width, height)?;
    let cover = selection::create_white_background_cover(&buffer, &SegmentationConfig::default())?;
    Ok(cover.into_raw_vec_and_offset().0)
}
