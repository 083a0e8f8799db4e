//! Panel selection: flood fill, boundary tracing and silhouette masks.
//!
//! Provides the engine behind click-to-panel selection on line-art vehicle
//! diagrams:
//! - **Single region**: flood fill from a click, trace and simplify its outline
//! - **All regions**: enumerate every enclosed panel in one raster pass
//! - **Silhouette**: separate the vehicle from a uniform background

pub mod color_match;
pub mod config;
pub mod contour;
pub mod flood_fill;
pub mod pixels;
pub mod region;
pub mod silhouette;
pub mod simplify;

#[cfg(test)]
mod test_images;

pub use color_match::ColorMatcher;
pub use config::{BackgroundSeed, SegmentationConfig, DEFAULT_TOLERANCE};
pub use contour::{trace_boundary, Contour, Point};
pub use flood_fill::{flood_fill, BoundingBox, FloodFill, VisitedMask};
pub use pixels::{Pixel, PixelBuffer};
pub use region::{
    detect_all_regions, detect_region, detect_region_at, detect_region_with_tolerance,
    flatten_polygons, pixel_coordinate, scan_regions, DetectedRegion, RegionScan,
};
pub use silhouette::{
    apply_mask_alpha, background_fill, create_background_mask, create_white_background_cover,
};
pub use simplify::{simplify_contour, Polygon};
