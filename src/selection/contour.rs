//! Boundary tracing over a visited mask.
//!
//! Walks the outer 8-connected edge of a filled region with Moore-neighbor
//! tracing and returns the boundary pixels in clockwise order.

use log::warn;

use super::flood_fill::{BoundingBox, VisitedMask};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// |dx| + |dy|
    #[inline]
    pub fn manhattan_distance(&self, other: &Point) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

/// Dense boundary produced by the tracer, one entry per boundary step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point>,
    /// The step limit was hit before the walk closed.
    pub truncated: bool,
}

/// Moore neighborhood directions (8-connected, clockwise from north)
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),  // 0: north
    (1, -1),  // 1: north-east
    (1, 0),   // 2: east
    (1, 1),   // 3: south-east
    (0, 1),   // 4: south
    (-1, 1),  // 5: south-west
    (-1, 0),  // 6: west
    (-1, -1), // 7: north-west
];

/// The start pixel is found by a left-to-right scan, so it was entered from the west.
const WEST: usize = 6;

/// Trace the outer boundary of the region in `mask`.
///
/// Returns `None` if `bounds` contains no visited pixel. The walk is capped
/// at `width * height` steps; hitting the cap logs a warning and returns the
/// partial contour with `truncated` set.
pub fn trace_boundary(mask: &VisitedMask, bounds: &BoundingBox) -> Option<Contour> {
    let max_steps = mask.width() * mask.height();
    trace_boundary_limited(mask, bounds, max_steps)
}

fn trace_boundary_limited(
    mask: &VisitedMask,
    bounds: &BoundingBox,
    max_steps: usize,
) -> Option<Contour> {
    let start = find_start(mask, bounds)?;

    let mut points = Vec::new();
    let mut current = start;
    let mut backtrack = WEST;
    let mut steps = 0usize;
    let mut truncated = false;

    loop {
        points.push(current);

        // First visited neighbor clockwise from the backtrack direction
        let next = (0..8).map(|i| (backtrack + i) % 8).find_map(|dir| {
            let (dx, dy) = DIRECTIONS[dir];
            let candidate = Point::new(current.x + dx, current.y + dy);
            mask.get_signed(candidate.x, candidate.y)
                .then_some((candidate, dir))
        });

        let Some((candidate, dir)) = next else {
            // Isolated pixel
            break;
        };

        current = candidate;
        backtrack = (dir + 5) % 8;
        steps += 1;

        if current == start {
            break;
        }
        if steps >= max_steps {
            warn!(
                "boundary trace truncated after {} steps starting at ({}, {})",
                steps, start.x, start.y
            );
            truncated = true;
            break;
        }
    }

    Some(Contour { points, truncated })
}

/// First visited pixel in row-major order within `bounds`.
fn find_start(mask: &VisitedMask, bounds: &BoundingBox) -> Option<Point> {
    (bounds.min_y..=bounds.max_y)
        .flat_map(|y| (bounds.min_x..=bounds.max_x).map(move |x| (x, y)))
        .find(|&(x, y)| mask.get(x, y))
        .map(|(x, y)| Point::new(x as i32, y as i32))
}
