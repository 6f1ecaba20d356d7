//! Soft radial edge for rectangular overlays
//!
//! The falloff is a circle centred on the overlay box whose outer radius
//! reaches the box's farthest corner. Inside `inner` of that radius the
//! overlay is fully opaque; beyond it opacity drops linearly to zero at the
//! corners. The circle is resolved by the rendering surface against the
//! box's on-screen size, so only the stop is carried here.

use crate::config::DEFAULT_SOFT_MASK_INNER;
use serde::{Deserialize, Serialize};

/// Circular soft-edge mask for a composite overlay.
///
/// # Example
/// ```
/// use groupshot_core::mask::SoftEdgeMask;
///
/// let mask = SoftEdgeMask::new(0.6);
/// assert!((mask.inner_percent() - 60.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftEdgeMask {
    /// Fully opaque up to this fraction of the outer radius (0.0 to 1.0)
    pub inner: f32,
}

impl SoftEdgeMask {
    pub fn new(inner: f32) -> Self {
        Self {
            inner: inner.clamp(0.0, 1.0),
        }
    }

    /// Inner stop as a percentage, for gradient rendering.
    pub fn inner_percent(&self) -> f32 {
        self.inner * 100.0
    }
}

impl Default for SoftEdgeMask {
    fn default() -> Self {
        Self::new(DEFAULT_SOFT_MASK_INNER)
    }
}
