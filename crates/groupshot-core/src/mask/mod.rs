//! Edge treatments for composite overlays
//!
//! An overlay crops a rectangle out of a source photo. Its edge is blended
//! into the base photo in one of two ways:
//!
//! - **Soft edge**: a radial falloff, fully opaque up to an inner radius and
//!   fully transparent at the farthest corner of the overlay box
//! - **Polygon clip**: a hard clip to the traced lasso outline
//!
//! ## Coordinate System
//!
//! Both treatments live in overlay-local coordinates. The soft edge carries
//! only its inner stop as a fraction of the centre-to-corner radius; the
//! polygon clip holds vertices in percent (0 to 100) of the overlay box, the
//! convention CSS `clip-path` percentages resolve against.

pub mod clip;
pub mod radial;

pub use clip::PolygonClip;
pub use radial::SoftEdgeMask;
