//! Contour decimation and the polygon type handed to callers.
//!
//! Decimation is greedy: the first and last boundary points are always
//! kept, and an interior point is kept only when it lies more than
//! `min_distance` (Manhattan) away from the previously kept point. With the
//! default distance of 1 this drops every other pixel on straight runs while
//! keeping the corners of panel outlines.

use std::fmt::Write;

use super::contour::Point;
use super::flood_fill::BoundingBox;

/// Closed polygon with at least three points. The last point connects back
/// to the first; point order follows the trace direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Returns `None` for fewer than three points or for any point with a
    /// negative coordinate. Vertices are pixel coordinates.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        let valid = points.len() >= 3 && points.iter().all(|p| p.x >= 0 && p.y >= 0);
        valid.then_some(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; see [`Polygon::new`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Extent of the vertices.
    pub fn bounds(&self) -> BoundingBox {
        let first = self.points[0];
        let mut bounds = BoundingBox::at(first.x as usize, first.y as usize);
        for p in &self.points[1..] {
            bounds.include(p.x as usize, p.y as usize);
        }
        bounds
    }

    /// Interleaved coordinates: x0, y0, x1, y1, ...
    pub fn to_flat(&self) -> Vec<i32> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// SVG path data (`M x,y L x,y ... Z`).
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        let first = self.points[0];
        let _ = write!(path, "M {},{}", first.x, first.y);
        for p in &self.points[1..] {
            let _ = write!(path, " L {},{}", p.x, p.y);
        }
        path.push_str(" Z");
        path
    }
}

/// Decimate a dense contour into a polygon.
///
/// Returns `None` when the contour, or the decimated result, has fewer than
/// three points.
pub fn simplify_contour(contour: &[Point], min_distance: u32) -> Option<Polygon> {
    if contour.len() < 3 {
        return None;
    }

    let last_index = contour.len() - 1;
    let mut kept = Vec::with_capacity(contour.len() / 2 + 2);
    kept.push(contour[0]);

    for &point in &contour[1..last_index] {
        let last_kept = kept[kept.len() - 1];
        if point.manhattan_distance(&last_kept) > min_distance {
            kept.push(point);
        }
    }
    kept.push(contour[last_index]);

    Polygon::new(kept)
}
