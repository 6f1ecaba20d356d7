//! Face region geometry.
//!
//! Regions live in percentage space: every coordinate is 0 to 100 relative to
//! the rendered bounding box of the photo they belong to. Pointer input
//! arrives in pixels and is converted exactly once at the input boundary.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner of the photo
//! - (100, 100) = bottom-right corner of the photo
//! - Pixel types (`PixelPoint`, `PixelSize`, `PixelRect`) are never mixed
//!   with percentage types (`PercentPoint`, `Region`)

mod polygon;
mod region;
mod space;

pub use polygon::{bounding_box, polygon_contains};
pub use region::{Region, PERCENT_MAX};
pub use space::{fit_image, PercentPoint, PixelPoint, PixelRect, PixelSize};

/// Tolerance used when checking region bounds after float arithmetic.
pub(crate) const EPSILON: f64 = 1e-9;
