//! Tunable geometry parameters.
//!
//! All values have documented defaults, so a UI can pass a partial object
//! (or nothing at all) and still get a valid configuration.

use crate::error::{GroupshotError, Result};
use crate::geometry::{Region, PERCENT_MAX};
use serde::{Deserialize, Serialize};

/// Minimum region width/height in percent.
pub const DEFAULT_MIN_DIM: f64 = 5.0;

/// Lasso closure radius in container pixels.
pub const DEFAULT_CLOSURE_RADIUS_PX: f64 = 15.0;

/// Fraction of the mask radius that stays fully opaque.
pub const DEFAULT_SOFT_MASK_INNER: f32 = 0.6;

/// Geometry configuration shared by the editor, lasso and compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Smallest allowed region width and height (percent)
    pub min_dim: f64,
    /// Distance from the first lasso point that closes the trace (pixels)
    pub closure_radius_px: f64,
    /// Region given to a manually added face box
    pub default_region: Region,
    /// Opaque fraction of the soft edge mask (0.0 to 1.0)
    pub soft_mask_inner: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_dim: DEFAULT_MIN_DIM,
            closure_radius_px: DEFAULT_CLOSURE_RADIUS_PX,
            default_region: Region::new(25.0, 25.0, 20.0, 25.0),
            soft_mask_inner: DEFAULT_SOFT_MASK_INNER,
        }
    }
}

impl GeometryConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.min_dim.is_finite() || self.min_dim <= 0.0 || self.min_dim > PERCENT_MAX {
            return Err(GroupshotError::InvalidConfig(format!(
                "min_dim must be in (0, 100], got {}",
                self.min_dim
            )));
        }
        if !self.closure_radius_px.is_finite() || self.closure_radius_px <= 0.0 {
            return Err(GroupshotError::InvalidConfig(format!(
                "closure_radius_px must be positive, got {}",
                self.closure_radius_px
            )));
        }
        if !(0.0..=1.0).contains(&self.soft_mask_inner) {
            return Err(GroupshotError::InvalidConfig(format!(
                "soft_mask_inner must be in [0, 1], got {}",
                self.soft_mask_inner
            )));
        }
        if !self.default_region.is_valid(self.min_dim) {
            return Err(GroupshotError::InvalidConfig(format!(
                "default_region {:?} violates the region invariant",
                self.default_region
            )));
        }
        Ok(())
    }
}
