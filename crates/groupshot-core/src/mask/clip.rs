//! Polygon clip for lasso overlays

use crate::geometry::{polygon_contains, PercentPoint, Region, PERCENT_MAX};
use serde::{Deserialize, Serialize};

/// Hard clip to a traced outline.
///
/// Vertices are percent of the overlay box. A lasso trace is stored in the
/// source photo's percentage space; [`PolygonClip::from_source`] re-bases it
/// onto the cropped rectangle so that it lines up once the crop is scaled to
/// fill the overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonClip {
    pub vertices: Vec<PercentPoint>,
}

impl PolygonClip {
    pub fn new(vertices: Vec<PercentPoint>) -> Self {
        Self { vertices }
    }

    /// Re-base a source-photo polygon onto the crop rectangle `crop`.
    ///
    /// `crop` must have non-zero width and height.
    pub fn from_source(polygon: &[PercentPoint], crop: &Region) -> Self {
        let vertices = polygon
            .iter()
            .map(|p| PercentPoint {
                x: (p.x - crop.x) / crop.width * PERCENT_MAX,
                y: (p.y - crop.y) / crop.height * PERCENT_MAX,
            })
            .collect();
        Self { vertices }
    }

    /// Whether an overlay-local percent point survives the clip.
    pub fn contains(&self, point: PercentPoint) -> bool {
        polygon_contains(&self.vertices, point)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
