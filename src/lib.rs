//! PanelStag Rust Extensions
//!
//! Panel segmentation for flat line-art vehicle diagrams, with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Detectors read images as arrays of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! Only `u8` images are supported. Flat RGBA bytes from a canvas can be
//! wrapped with [`selection::PixelBuffer::from_raw`].
//!
//! ## Entry Points
//! - [`selection::detect_region`]: polygon of the panel under a click
//! - [`selection::detect_all_regions`]: polygons of every enclosed panel
//! - [`selection::create_background_mask`]: vehicle/background opacity mask
//! - [`selection::create_white_background_cover`]: RGBA cover hiding the background

pub mod error;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{SegmentError, SegmentResult};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::SegmentError;
    use crate::selection::{self, BackgroundSeed, PixelBuffer, Polygon, SegmentationConfig};

    impl From<SegmentError> for PyErr {
        fn from(err: SegmentError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn polygon_points(polygon: Polygon) -> Vec<(i32, i32)> {
        polygon.into_points().into_iter().map(|p| (p.x, p.y)).collect()
    }

    fn background_config(
        background_tolerance: u8,
        seed: Option<(usize, usize)>,
    ) -> SegmentationConfig {
        let config = SegmentationConfig::default().with_background_tolerance(background_tolerance);
        match seed {
            Some((x, y)) => config.with_background_seed(BackgroundSeed::Point(x, y)),
            None => config,
        }
    }

    // ========================================================================
    // Panel Detection
    // ========================================================================

    /// Detect the panel polygon under a click.
    ///
    /// # Arguments
    /// * `image` - Image with 1, 3, or 4 channels (height, width, channels)
    /// * `x`, `y` - Click position; fractional values are floored
    /// * `tolerance` - Color tolerance (0-255)
    ///
    /// # Returns
    /// List of (x, y) vertices, or None if no panel was found
    #[pyfunction]
    #[pyo3(signature = (image, x, y, tolerance=40))]
    pub fn detect_region<'py>(
        image: PyReadonlyArray3<'py, u8>,
        x: f64,
        y: f64,
        tolerance: u8,
    ) -> PyResult<Option<Vec<(i32, i32)>>> {
        let buffer = PixelBuffer::new(image.as_array())?;
        let config = SegmentationConfig::default().with_tolerance(tolerance);
        let polygon = selection::detect_region_at(&buffer, x, y, &config)?;
        Ok(polygon.map(polygon_points))
    }

    /// Detect every enclosed panel.
    ///
    /// Panels touching the image border are treated as background unless
    /// `include_edge_regions` is set.
    #[pyfunction]
    #[pyo3(signature = (image, tolerance=40, include_edge_regions=false))]
    pub fn detect_all_regions<'py>(
        image: PyReadonlyArray3<'py, u8>,
        tolerance: u8,
        include_edge_regions: bool,
    ) -> PyResult<Vec<Vec<(i32, i32)>>> {
        let buffer = PixelBuffer::new(image.as_array())?;
        let config = SegmentationConfig::default()
            .with_tolerance(tolerance)
            .with_skip_edge_regions(!include_edge_regions);
        let polygons = selection::detect_all_regions(&buffer, &config)?;
        Ok(polygons.into_iter().map(polygon_points).collect())
    }

    // ========================================================================
    // Silhouette Masks
    // ========================================================================

    /// Vehicle opacity mask (height, width): 0 = background, 255 = vehicle.
    #[pyfunction]
    #[pyo3(signature = (image, background_tolerance=20, seed=None))]
    pub fn create_background_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        background_tolerance: u8,
        seed: Option<(usize, usize)>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let buffer = PixelBuffer::new(image.as_array())?;
        let config = background_config(background_tolerance, seed);
        let mask = selection::create_background_mask(&buffer, &config)?;
        Ok(mask.into_pyarray(py))
    }

    /// RGBA cover (height, width, 4): opaque white on background, clear on the vehicle.
    #[pyfunction]
    #[pyo3(signature = (image, background_tolerance=20, seed=None))]
    pub fn create_white_background_cover<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        background_tolerance: u8,
        seed: Option<(usize, usize)>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = PixelBuffer::new(image.as_array())?;
        let config = background_config(background_tolerance, seed);
        let cover = selection::create_white_background_cover(&buffer, &config)?;
        Ok(cover.into_pyarray(py))
    }

    /// Clip an RGBA image to a mask by scaling its alpha channel.
    #[pyfunction]
    pub fn apply_mask_alpha<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        mask: PyReadonlyArray2<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = selection::apply_mask_alpha(image.as_array(), mask.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// PanelStag Rust extension module
    #[pymodule]
    pub fn panelstag(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Panel detection
        m.add_function(wrap_pyfunction!(detect_region, m)?)?;
        m.add_function(wrap_pyfunction!(detect_all_regions, m)?)?;

        // Silhouette masks
        m.add_function(wrap_pyfunction!(create_background_mask, m)?)?;
        m.add_function(wrap_pyfunction!(create_white_background_cover, m)?)?;
        m.add_function(wrap_pyfunction!(apply_mask_alpha, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::panelstag;
