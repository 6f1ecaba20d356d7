//! Percentage-space face regions and their clamping rules.

use super::EPSILON;
use crate::error::{GroupshotError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound of percentage space.
pub const PERCENT_MAX: f64 = 100.0;

/// Axis-aligned rectangle in percentage space.
///
/// A valid region satisfies `0 <= x`, `0 <= y`, `x + width <= 100`,
/// `y + height <= 100` and both dimensions are at least the configured
/// minimum. Detector output is trusted as-is; everything the editor
/// computes goes through [`Region::clamp_move`] or [`Region::clamp_resize`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left edge (percent of photo width)
    pub x: f64,
    /// Top edge (percent of photo height)
    pub y: f64,
    /// Width (percent of photo width)
    pub width: f64,
    /// Height (percent of photo height)
    pub height: f64,
}

impl Region {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from untrusted input, rejecting invariant violations.
    pub fn try_new(x: f64, y: f64, width: f64, height: f64, min_dim: f64) -> Result<Self> {
        let region = Self::new(x, y, width, height);
        if region.is_valid(min_dim) {
            Ok(region)
        } else {
            Err(GroupshotError::InvalidRegion {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check the region invariant.
    pub fn is_valid(&self, min_dim: f64) -> bool {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());

        finite
            && self.x >= -EPSILON
            && self.y >= -EPSILON
            && self.right() <= PERCENT_MAX + EPSILON
            && self.bottom() <= PERCENT_MAX + EPSILON
            && self.width >= min_dim - EPSILON
            && self.height >= min_dim - EPSILON
    }

    /// Translate by `(dx, dy)` percent, keeping the box inside the photo.
    ///
    /// The size is preserved; only the origin is clamped to
    /// `[0, 100 - width]` x `[0, 100 - height]`.
    pub fn clamp_move(&self, dx: f64, dy: f64) -> Region {
        Region {
            x: (self.x + dx).min(PERCENT_MAX - self.width).max(0.0),
            y: (self.y + dy).min(PERCENT_MAX - self.height).max(0.0),
            ..*self
        }
    }

    /// Grow or shrink by `(dw, dh)` percent with the top-left corner fixed.
    ///
    /// Width is clamped to `[min_dim, 100 - x]`, height to `[min_dim, 100 - y]`.
    /// An origin too close to the far edge for `min_dim` is pulled back to
    /// `100 - min_dim`; for valid input the corner never moves.
    pub fn clamp_resize(&self, dw: f64, dh: f64, min_dim: f64) -> Region {
        let x = self.x.max(0.0);
        let y = self.y.max(0.0);
        let width = (self.width + dw).min(PERCENT_MAX - x).max(min_dim);
        let height = (self.height + dh).min(PERCENT_MAX - y).max(min_dim);

        Region {
            x: x.min(PERCENT_MAX - width).max(0.0),
            y: y.min(PERCENT_MAX - height).max(0.0),
            width,
            height,
        }
    }

    /// Force an arbitrary region into the invariant.
    ///
    /// Dimensions are first brought into `[min_dim, 100]`, then the origin is
    /// clamped so the box fits. Non-finite components fall back to zero.
    /// A region that is already valid comes back unchanged.
    pub fn normalized(&self, min_dim: f64) -> Region {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        let width = finite_or_zero(self.width).max(min_dim).min(PERCENT_MAX);
        let height = finite_or_zero(self.height).max(min_dim).min(PERCENT_MAX);

        Region {
            x: finite_or_zero(self.x).min(PERCENT_MAX - width).max(0.0),
            y: finite_or_zero(self.y).min(PERCENT_MAX - height).max(0.0),
            width,
            height,
        }
    }

    /// Whether a percentage-space point lies inside the region (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x - EPSILON
            && x <= self.right() + EPSILON
            && y >= self.y - EPSILON
            && y <= self.bottom() + EPSILON
    }

    /// Intersection over union with another region.
    pub fn iou(&self, other: &Region) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        let intersection = (x2 - x1) * (y2 - y1);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
