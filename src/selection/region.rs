//! Panel detection: click-to-region and whole-image region enumeration.
//!
//! Both detectors run the same pipeline per region:
//! flood fill -> degenerate check -> boundary trace -> simplification.

use log::debug;

use super::color_match::ColorMatcher;
use super::config::SegmentationConfig;
use super::contour::trace_boundary;
use super::flood_fill::{flood_fill, BoundingBox, FloodFill, VisitedMask};
use super::pixels::PixelBuffer;
use super::simplify::{simplify_contour, Polygon};
use crate::error::{SegmentError, SegmentResult};

/// Detect the panel under the point (x, y).
///
/// # Arguments
/// * `buffer` - Source image
/// * `x`, `y` - Click position in image pixels
/// * `config` - Tolerance and heuristics
///
/// # Returns
/// `Ok(None)` when the click lands on a line, a speck, or anything else that
/// does not trace to a valid polygon. Errors only for out-of-bounds clicks.
pub fn detect_region(
    buffer: &PixelBuffer<'_>,
    x: usize,
    y: usize,
    config: &SegmentationConfig,
) -> SegmentResult<Option<Polygon>> {
    buffer.check_bounds(x, y)?;

    let matcher = ColorMatcher::new(buffer.pixel(x, y), config.tolerance, config);
    let fill = flood_fill(buffer, x, y, &matcher, None);
    Ok(polygon_from_fill(fill, config))
}

/// [`detect_region`] with the default configuration and a custom tolerance.
pub fn detect_region_with_tolerance(
    buffer: &PixelBuffer<'_>,
    x: usize,
    y: usize,
    tolerance: u8,
) -> SegmentResult<Option<Polygon>> {
    let config = SegmentationConfig::default().with_tolerance(tolerance);
    detect_region(buffer, x, y, &config)
}

/// [`detect_region`] for fractional pointer coordinates, floored to pixels.
pub fn detect_region_at(
    buffer: &PixelBuffer<'_>,
    x: f64,
    y: f64,
    config: &SegmentationConfig,
) -> SegmentResult<Option<Polygon>> {
    let (px, py) = pixel_coordinate(buffer, x, y)?;
    detect_region(buffer, px, py, config)
}

/// Floor a pointer position to a pixel inside the buffer.
pub fn pixel_coordinate(buffer: &PixelBuffer<'_>, x: f64, y: f64) -> SegmentResult<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return Err(SegmentError::InvalidCoordinate { x, y });
    }
    let fx = x.floor();
    let fy = y.floor();
    if fx < 0.0 || fy < 0.0 || fx >= buffer.width() as f64 || fy >= buffer.height() as f64 {
        return Err(SegmentError::OutOfBounds {
            x: fx as i64,
            y: fy as i64,
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    Ok((fx as usize, fy as usize))
}

fn polygon_from_fill(fill: FloodFill, config: &SegmentationConfig) -> Option<Polygon> {
    let (mask, bounds) = fill.into_region(config.min_region_span)?;
    polygon_from_mask(&mask, &bounds, config)
}

fn polygon_from_mask(
    mask: &VisitedMask,
    bounds: &BoundingBox,
    config: &SegmentationConfig,
) -> Option<Polygon> {
    let contour = trace_boundary(mask, bounds)?;
    simplify_contour(&contour.points, config.simplify_distance)
}

/// A region found by [`scan_regions`].
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedRegion {
    pub polygon: Polygon,
    /// Pixel bounds of the filled region.
    pub bounds: BoundingBox,
    pub pixel_count: usize,
    /// Raster position where the region was first reached.
    pub seed: (usize, usize),
}

/// Output of a full-image scan.
#[derive(Clone, Debug)]
pub struct RegionScan {
    /// Regions in raster order of their first pixel.
    pub regions: Vec<DetectedRegion>,
    /// Every pixel taken by some fill, including dropped fragments and
    /// edge-touching background.
    pub claimed: VisitedMask,
}

/// Enumerate every enclosed region of the image.
///
/// Scans row-major. Each unclaimed pixel that is not a dark line pixel seeds
/// a flood fill that may not enter pixels claimed earlier, so regions never
/// share a pixel. Fills that are too small, touch the image border (with
/// `skip_edge_regions`), are nowhere thicker than 2 px, or fail to trace
/// are claimed but not reported.
pub fn scan_regions(
    buffer: &PixelBuffer<'_>,
    config: &SegmentationConfig,
) -> SegmentResult<RegionScan> {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 {
        return Err(SegmentError::EmptyImage { width, height });
    }

    let mut claimed = VisitedMask::new(width, height);
    let mut regions = Vec::new();
    let mut fills = 0usize;

    for y in 0..height {
        for x in 0..width {
            if claimed.get(x, y) {
                continue;
            }
            let seed = buffer.pixel(x, y);
            if seed.brightness() < config.dark_cutoff {
                continue;
            }

            let matcher = ColorMatcher::new(seed, config.tolerance, config);
            let fill = flood_fill(buffer, x, y, &matcher, Some(&claimed));
            if let Some(bounds) = &fill.bounds {
                claimed.merge_within(&fill.visited, bounds);
            }
            fills += 1;

            let pixel_count = fill.pixel_count;
            let Some((mask, bounds)) = fill.into_region(config.min_region_span) else {
                continue;
            };
            if config.skip_edge_regions && bounds.touches_edge(width, height) {
                continue;
            }
            // Anti-aliasing fringes along outlines form 1-2 px rings
            if !mask.has_interior(&bounds) {
                continue;
            }
            if let Some(polygon) = polygon_from_mask(&mask, &bounds, config) {
                regions.push(DetectedRegion {
                    polygon,
                    bounds,
                    pixel_count,
                    seed: (x, y),
                });
            }
        }
    }

    debug!(
        "scanned {}x{} image: {} fills, {} regions",
        width,
        height,
        fills,
        regions.len()
    );

    Ok(RegionScan { regions, claimed })
}

/// Polygons of every enclosed region, in raster order.
pub fn detect_all_regions(
    buffer: &PixelBuffer<'_>,
    config: &SegmentationConfig,
) -> SegmentResult<Vec<Polygon>> {
    let scan = scan_regions(buffer, config)?;
    Ok(scan.regions.into_iter().map(|r| r.polygon).collect())
}

/// Flatten polygons for transfer across FFI boundaries.
///
/// # Returns
/// Flat array: [num_polygons, len1, x1, y1, x2, y2, ..., len2, ...]
pub fn flatten_polygons(polygons: &[Polygon]) -> Vec<i32> {
    let mut result = Vec::new();
    result.push(polygons.len() as i32);

    for polygon in polygons {
        result.push(polygon.len() as i32);
        result.extend(polygon.to_flat());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::contour::Point;
    use crate::selection::test_images::{
        bordered_square, fringed_two_panels, outline_rect, put, solid, two_panels, BLACK, WHITE,
    };

    fn assert_near(actual: usize, expected: usize, slack: usize) {
        assert!(
            actual.abs_diff(expected) <= slack,
            "expected {expected} +/- {slack}, got {actual}"
        );
    }

    #[test]
    fn test_square_interior() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let polygon = detect_region(&buffer, 50, 50, &SegmentationConfig::default())
            .unwrap()
            .expect("interior should be detected");
        let b = polygon.bounds();
        assert_near(b.min_x, 21, 2);
        assert_near(b.min_y, 21, 2);
        assert_near(b.max_x, 79, 2);
        assert_near(b.max_y, 79, 2);
        assert!(polygon.len() >= 3);
    }

    #[test]
    fn test_background_does_not_cross_border() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let polygon = detect_region(&buffer, 5, 5, &SegmentationConfig::default())
            .unwrap()
            .expect("background should be detected");
        let b = polygon.bounds();
        assert_eq!((b.min_x, b.min_y), (0, 0));
        assert_eq!((b.max_x, b.max_y), (99, 99));
        // The outer trace never steps onto the border or inside the square
        for p in polygon.points() {
            let inside = (20..=80).contains(&p.x) && (20..=80).contains(&p.y);
            assert!(!inside, "point {p:?} crossed the border");
        }
    }

    #[test]
    fn test_click_on_line_never_spans_both_sides() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let result = detect_region(&buffer, 20, 50, &SegmentationConfig::default()).unwrap();
        if let Some(polygon) = result {
            for p in polygon.points() {
                assert_eq!(image[[p.y as usize, p.x as usize, 0]], BLACK[0]);
            }
        }
    }

    #[test]
    fn test_small_speck_is_none() {
        let mut image = solid(30, 30, BLACK);
        for y in 10..13 {
            for x in 10..13 {
                put(&mut image, x, y, WHITE);
            }
        }
        let buffer = PixelBuffer::new(image.view()).unwrap();
        assert_eq!(detect_region(&buffer, 11, 11, &SegmentationConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_idempotent() {
        let image = two_panels();
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let config = SegmentationConfig::default();

        let a = detect_region(&buffer, 30, 30, &config).unwrap();
        let b = detect_region(&buffer, 30, 30, &config).unwrap();
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_bounds_click() {
        let image = solid(10, 10, WHITE);
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let err = detect_region(&buffer, 10, 3, &SegmentationConfig::default()).unwrap_err();
        assert!(matches!(err, SegmentError::OutOfBounds { x: 10, y: 3, .. }));
    }

    #[test]
    fn test_fractional_pointer() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let config = SegmentationConfig::default();

        let a = detect_region_at(&buffer, 50.7, 49.2, &config).unwrap();
        let b = detect_region(&buffer, 50, 49, &config).unwrap();
        assert_eq!(a, b);

        assert!(matches!(
            detect_region_at(&buffer, -0.5, 10.0, &config),
            Err(SegmentError::OutOfBounds { .. })
        ));
        assert!(matches!(
            detect_region_at(&buffer, f64::NAN, 10.0, &config),
            Err(SegmentError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_tolerance_controls_leak() {
        // Light grey panel next to white with no line between them
        let mut image = solid(40, 40, WHITE);
        for y in 0..40 {
            for x in 20..40 {
                put(&mut image, x, y, [200, 200, 200, 255]);
            }
        }
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let tight = detect_region_with_tolerance(&buffer, 5, 5, 40).unwrap().unwrap();
        assert_eq!(tight.bounds().max_x, 19);

        let loose = detect_region_with_tolerance(&buffer, 5, 5, 60).unwrap().unwrap();
        assert_eq!(loose.bounds().max_x, 39);
    }

    #[test]
    fn test_two_panels() {
        let image = two_panels();
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let scan = scan_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert_eq!(scan.regions.len(), 2);

        let left = &scan.regions[0];
        let right = &scan.regions[1];
        assert_eq!(left.seed, (11, 11));
        assert_eq!(right.seed, (51, 11));
        assert_eq!(
            left.bounds,
            BoundingBox { min_x: 11, min_y: 11, max_x: 49, max_y: 49 }
        );
        assert_eq!(
            right.bounds,
            BoundingBox { min_x: 51, min_y: 11, max_x: 89, max_y: 49 }
        );
        assert_eq!(left.pixel_count, 39 * 39);
        assert_eq!(right.pixel_count, 39 * 39);

        let polygons = detect_all_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert_eq!(polygons.len(), 2);
        let (lb, rb) = (polygons[0].bounds(), polygons[1].bounds());
        assert!(lb.max_x < rb.min_x);
    }

    #[test]
    fn test_fringed_outlines_are_not_panels() {
        let image = fringed_two_panels();
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let scan = scan_regions(&buffer, &SegmentationConfig::default()).unwrap();
        let seeds: Vec<_> = scan.regions.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![(12, 12), (52, 12)]);
        assert_eq!(scan.regions[0].pixel_count, 37 * 37);
        assert_eq!(scan.regions[1].pixel_count, 37 * 37);

        // Fringe pixels are still claimed so they never seed again
        assert!(scan.claimed.get(9, 9));
        assert!(scan.claimed.get(11, 11));
        assert!(scan.claimed.get(51, 30));
    }

    #[test]
    fn test_min_region_span_drops_small_panels() {
        // 30x30 panel and 8x8 panel
        let mut image = solid(60, 40, WHITE);
        outline_rect(&mut image, 2, 2, 33, 33);
        outline_rect(&mut image, 40, 2, 49, 11);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let all = scan_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert_eq!(all.regions.len(), 2);

        let config = SegmentationConfig::default().with_min_region_span(10);
        let large = scan_regions(&buffer, &config).unwrap();
        assert_eq!(large.regions.len(), 1);
        assert_eq!(large.regions[0].seed, (3, 3));
        // The small panel is claimed even though it is not reported
        assert!(large.claimed.get(45, 6));
    }

    #[test]
    fn test_simplify_distance_controls_density() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let fine = detect_region(&buffer, 50, 50, &SegmentationConfig::default())
            .unwrap()
            .unwrap();
        let config = SegmentationConfig::default().with_simplify_distance(5);
        let coarse = detect_region(&buffer, 50, 50, &config).unwrap().unwrap();

        assert!(coarse.len() < fine.len());
        assert_eq!(coarse.points()[0], fine.points()[0]);
    }

    #[test]
    fn test_scan_regions_are_disjoint() {
        // Grid of 3x2 cells plus a nested box
        let mut image = solid(90, 60, WHITE);
        for cx in 0..3 {
            for cy in 0..2 {
                outline_rect(&mut image, 5 + cx * 28, 5 + cy * 26, 30 + cx * 28, 28 + cy * 26);
            }
        }
        outline_rect(&mut image, 10, 10, 22, 22);
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let config = SegmentationConfig::default();

        let scan = scan_regions(&buffer, &config).unwrap();
        assert_eq!(scan.regions.len(), 7);

        // Refill each region from its seed and check no pixel is shared
        let mut union = VisitedMask::new(90, 60);
        let mut total = 0;
        for region in &scan.regions {
            let (x, y) = region.seed;
            let matcher = ColorMatcher::new(buffer.pixel(x, y), config.tolerance, &config);
            let fill = flood_fill(&buffer, x, y, &matcher, None);
            assert!(!fill.visited.intersects(&union));
            assert_eq!(fill.pixel_count, region.pixel_count);
            union.merge_from(&fill.visited);
            total += fill.pixel_count;
        }
        assert_eq!(union.count(), total);
    }

    #[test]
    fn test_flatten_polygons() {
        let square = Polygon::new(vec![
            Point::new(1, 1),
            Point::new(4, 1),
            Point::new(4, 4),
        ])
        .unwrap();
        assert_eq!(flatten_polygons(&[]), vec![0]);
        assert_eq!(
            flatten_polygons(&[square.clone(), square]),
            vec![2, 3, 1, 1, 4, 1, 4, 4, 3, 1, 1, 4, 1, 4, 4]
        );
    }

    #[test]
    fn test_scan_without_enclosed_regions() {
        let image = solid(20, 20, WHITE);
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let polygons = detect_all_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert!(polygons.is_empty());

        let image = solid(20, 20, BLACK);
        let buffer = PixelBuffer::new(image.view()).unwrap();
        let scan = scan_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert!(scan.regions.is_empty());
        assert_eq!(scan.claimed.count(), 0);
    }

    #[test]
    fn test_scan_can_include_edge_regions() {
        let image = bordered_square(100, 100, 20, 80);
        let buffer = PixelBuffer::new(image.view()).unwrap();

        let enclosed = detect_all_regions(&buffer, &SegmentationConfig::default()).unwrap();
        assert_eq!(enclosed.len(), 1);

        let config = SegmentationConfig::default().with_skip_edge_regions(false);
        let all = scan_regions(&buffer, &config).unwrap();
        assert_eq!(all.regions.len(), 2);
        // Background is reached first in raster order
        assert_eq!(all.regions[0].seed, (0, 0));
        assert_eq!(all.regions[1].seed, (21, 21));
    }
}
