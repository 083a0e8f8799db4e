//! Tuning parameters shared by all detectors.

/// Default color tolerance for panel detection.
pub const DEFAULT_TOLERANCE: u8 = 40;

/// Where the silhouette synthesizer samples the background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackgroundSeed {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Explicit image coordinate.
    Point(usize, usize),
}

impl BackgroundSeed {
    /// Resolve to an image coordinate for a width x height image.
    pub fn resolve(&self, width: usize, height: usize) -> (usize, usize) {
        let right = width.saturating_sub(1);
        let bottom = height.saturating_sub(1);
        match *self {
            BackgroundSeed::TopLeft => (0, 0),
            BackgroundSeed::TopRight => (right, 0),
            BackgroundSeed::BottomLeft => (0, bottom),
            BackgroundSeed::BottomRight => (right, bottom),
            BackgroundSeed::Point(x, y) => (x, y),
        }
    }
}

/// Segmentation parameters.
///
/// The defaults are calibrated against line-art vehicle diagrams: white
/// panels separated by dark, anti-aliased strokes on a white background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentationConfig {
    /// Per-channel color tolerance (0-255). The match threshold is
    /// `tolerance * 4` summed over RGBA.
    pub tolerance: u8,
    /// Seeds brighter than this are "light".
    pub light_threshold: f32,
    /// Candidates darker than this never join a light region, and are
    /// never used as scan seeds.
    pub dark_cutoff: f32,
    /// Regions whose bounding box spans fewer pixels than this in either
    /// axis are discarded as noise.
    pub min_region_span: usize,
    /// Manhattan distance a contour point must exceed from the last kept
    /// point to survive simplification.
    pub simplify_distance: u32,
    /// Tolerance used when flooding the background for silhouette masks.
    pub background_tolerance: u8,
    /// Reference point for the background color.
    pub background_seed: BackgroundSeed,
    /// Drop scanned regions that touch the image border.
    pub skip_edge_regions: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            light_threshold: 150.0,
            dark_cutoff: 100.0,
            min_region_span: 5,
            simplify_distance: 1,
            background_tolerance: 20,
            background_seed: BackgroundSeed::TopLeft,
            skip_edge_regions: true,
        }
    }
}

impl SegmentationConfig {
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_background_tolerance(mut self, tolerance: u8) -> Self {
        self.background_tolerance = tolerance;
        self
    }

    pub fn with_background_seed(mut self, seed: BackgroundSeed) -> Self {
        self.background_seed = seed;
        self
    }

    pub fn with_min_region_span(mut self, span: usize) -> Self {
        self.min_region_span = span;
        self
    }

    pub fn with_simplify_distance(mut self, distance: u32) -> Self {
        self.simplify_distance = distance;
        self
    }

    pub fn with_skip_edge_regions(mut self, skip: bool) -> Self {
        self.skip_edge_regions = skip;
        self
    }
}
