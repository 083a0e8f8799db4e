//! Color matching rule for flood fill.
//!
//! A candidate joins the region when its summed RGBA difference from the
//! reference is within `tolerance * 4`. When the reference is light, any
//! candidate darker than the dark cutoff is rejected outright so that fills
//! stop at anti-aliased outline strokes instead of seeping through their
//! grey fringe.
//!
//! The rule is asymmetric on purpose: a dark reference gets no cutoff, so
//! flooding a stroke from a stroke pixel behaves like a plain tolerance
//! match. Keep it that way; the thresholds are calibrated on real diagrams.

use super::config::SegmentationConfig;
use super::pixels::Pixel;

/// Matches candidates against a fixed reference pixel.
#[derive(Clone, Copy, Debug)]
pub struct ColorMatcher {
    reference: Pixel,
    max_distance: u32,
    reference_is_light: bool,
    dark_cutoff: f32,
}

impl ColorMatcher {
    pub fn new(reference: Pixel, tolerance: u8, config: &SegmentationConfig) -> Self {
        Self {
            reference,
            max_distance: tolerance as u32 * 4,
            reference_is_light: reference.brightness() > config.light_threshold,
            dark_cutoff: config.dark_cutoff,
        }
    }

    pub fn reference(&self) -> Pixel {
        self.reference
    }

    /// True when the reference was classified as light.
    pub fn is_light(&self) -> bool {
        self.reference_is_light
    }

    #[inline]
    pub fn matches(&self, candidate: Pixel) -> bool {
        if self.reference_is_light && candidate.brightness() < self.dark_cutoff {
            return false;
        }
        self.reference.manhattan_distance(&candidate) <= self.max_distance
    }
}
