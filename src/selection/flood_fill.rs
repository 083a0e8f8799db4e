//! Flood fill over a pixel buffer.
//!
//! Grows a 4-connected region of matching pixels from a seed. The fill uses
//! an explicit coordinate stack so region size never affects call depth.
//!
//! Two call shapes share the same primitive:
//! - single detection: `claimed = None`, every pixel is available
//! - multi-region scan: `claimed = Some(mask)`, pixels already taken by an
//!   earlier region are treated as non-matching

use super::color_match::ColorMatcher;
use super::pixels::PixelBuffer;

/// One flag per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl VisitedMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Like [`get`](Self::get) but treats out-of-bounds as unvisited.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.bits[(y as usize) * self.width + (x as usize)]
        } else {
            false
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.bits[y * self.width + x] = true;
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&v| v).count()
    }

    /// OR another mask of the same size into this one.
    pub fn merge_from(&mut self, other: &VisitedMask) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        for (dst, &src) in self.bits.iter_mut().zip(&other.bits) {
            *dst |= src;
        }
    }

    /// OR another mask in, only looking inside `bounds`.
    pub fn merge_within(&mut self, other: &VisitedMask, bounds: &BoundingBox) {
        for y in bounds.min_y..=bounds.max_y {
            let row = y * self.width;
            for x in bounds.min_x..=bounds.max_x {
                self.bits[row + x] |= other.bits[row + x];
            }
        }
    }

    /// True if any pixel is set in both masks.
    pub fn intersects(&self, other: &VisitedMask) -> bool {
        self.bits.iter().zip(&other.bits).any(|(&a, &b)| a && b)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// True if some set pixel inside `bounds` has all 8 neighbors set,
    /// i.e. the region is at least 3 px thick somewhere.
    pub fn has_interior(&self, bounds: &BoundingBox) -> bool {
        if bounds.span_x() < 2 || bounds.span_y() < 2 {
            return false;
        }
        (bounds.min_y + 1..bounds.max_y).any(|y| {
            (bounds.min_x + 1..bounds.max_x).any(|x| {
                (y - 1..=y + 1).all(|ny| (x - 1..=x + 1).all(|nx| self.get(nx, ny)))
            })
        })
    }
}

/// Inclusive pixel bounds of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    #[inline]
    pub fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// `max_x - min_x`
    pub fn span_x(&self) -> usize {
        self.max_x - self.min_x
    }

    /// `max_y - min_y`
    pub fn span_y(&self) -> usize {
        self.max_y - self.min_y
    }

    /// Inclusive width in pixels.
    pub fn width(&self) -> usize {
        self.span_x() + 1
    }

    /// Inclusive height in pixels.
    pub fn height(&self) -> usize {
        self.span_y() + 1
    }

    /// True when the box reaches any border of a width x height image.
    pub fn touches_edge(&self, width: usize, height: usize) -> bool {
        self.min_x == 0 || self.min_y == 0 || self.max_x + 1 >= width || self.max_y + 1 >= height
    }
}

/// Result of a single flood fill.
#[derive(Clone, Debug)]
pub struct FloodFill {
    /// Pixels belonging to the region.
    pub visited: VisitedMask,
    /// Bounds of the region, `None` if nothing matched.
    pub bounds: Option<BoundingBox>,
    /// Number of pixels in the region.
    pub pixel_count: usize,
}

impl FloodFill {
    /// Keep the fill only if its bounds span at least `min_span` pixels
    /// (`max - min`) on both axes.
    pub fn into_region(self, min_span: usize) -> Option<(VisitedMask, BoundingBox)> {
        let bounds = self.bounds?;
        if bounds.span_x() < min_span || bounds.span_y() < min_span {
            return None;
        }
        Some((self.visited, bounds))
    }
}

/// Flood fill from `(seed_x, seed_y)`.
///
/// The seed must be inside the buffer; callers validate before calling.
pub fn flood_fill(
    buffer: &PixelBuffer<'_>,
    seed_x: usize,
    seed_y: usize,
    matcher: &ColorMatcher,
    claimed: Option<&VisitedMask>,
) -> FloodFill {
    let width = buffer.width();
    let height = buffer.height();
    let mut visited = VisitedMask::new(width, height);
    let mut bounds: Option<BoundingBox> = None;
    let mut pixel_count = 0;

    let mut stack: Vec<(usize, usize)> = vec![(seed_x, seed_y)];

    while let Some((x, y)) = stack.pop() {
        // Neighbors may be pushed more than once; filter on pop
        if visited.get(x, y) || claimed.is_some_and(|c| c.get(x, y)) {
            continue;
        }
        if !matcher.matches(buffer.pixel(x, y)) {
            continue;
        }

        visited.set(x, y);
        pixel_count += 1;
        match bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => bounds = Some(BoundingBox::at(x, y)),
        }

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    FloodFill {
        visited,
        bounds,
        pixel_count,
    }
}
