//! Declarative overlay transforms for previewing a composite.
//!
//! An overlay sits exactly over a destination region `D` on the base photo
//! and shows the source photo as its background, scaled and offset so that
//! the source face's region `R` fills the overlay box:
//!
//! ```text
//! background-size     = (100 / R.width * 100 %,  100 / R.height * 100 %)
//! background-position = (-R.x / R.width * 100 %, -R.y / R.height * 100 %)
//! ```
//!
//! No pixels are read or produced here. The rendering surface turns a
//! [`CompositeOverlay`] into layout instructions.

use crate::config::GeometryConfig;
use crate::face::{Face, FaceId, FaceSource};
use crate::geometry::{Region, PERCENT_MAX};
use crate::mask::{PolygonClip, SoftEdgeMask};
use crate::selection::SelectionBinding;
use serde::{Deserialize, Serialize};

/// Background scale and offset, in percent, that crop a source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTransform {
    pub size_x: f64,
    pub size_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl BackgroundTransform {
    /// Transform that maps `crop` onto the whole overlay box.
    ///
    /// `crop` must have non-zero width and height.
    pub fn for_crop(crop: &Region) -> Self {
        Self {
            size_x: PERCENT_MAX / crop.width * PERCENT_MAX,
            size_y: PERCENT_MAX / crop.height * PERCENT_MAX,
            offset_x: -crop.x / crop.width * PERCENT_MAX,
            offset_y: -crop.y / crop.height * PERCENT_MAX,
        }
    }
}

/// How the overlay's edge blends into the base photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeTreatment {
    /// Radial fade for rectangular crops
    SoftMask(SoftEdgeMask),
    /// Hard clip to a lasso outline; no fade
    PolygonClip(PolygonClip),
}

/// Everything a rendering surface needs to draw one replaced face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeOverlay {
    pub dest_face_id: FaceId,
    pub source_face_id: FaceId,
    /// Photo drawn as the overlay background
    pub photo_url: String,
    /// Overlay box on the base photo
    pub position: Region,
    pub background: BackgroundTransform,
    pub edge: EdgeTreatment,
}

/// Computes overlays for destination/source face pairs.
#[derive(Debug, Clone, Default)]
pub struct CompositeRenderer {
    config: GeometryConfig,
}

impl CompositeRenderer {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Overlay that draws `source` into the destination region `dest`.
    ///
    /// The source region is brought into the region invariant first, so a
    /// degenerate record can never divide by zero.
    pub fn overlay(&self, dest_face_id: &FaceId, dest: &Region, source: &Face) -> CompositeOverlay {
        let crop = source.region.normalized(self.config.min_dim);

        let edge = match &source.source {
            FaceSource::Detected | FaceSource::Manual => {
                EdgeTreatment::SoftMask(SoftEdgeMask::new(self.config.soft_mask_inner))
            }
            FaceSource::Lasso { polygon } => {
                EdgeTreatment::PolygonClip(PolygonClip::from_source(polygon, &crop))
            }
        };

        CompositeOverlay {
            dest_face_id: dest_face_id.clone(),
            source_face_id: source.face_id.clone(),
            photo_url: source.photo_url.clone(),
            position: *dest,
            background: BackgroundTransform::for_crop(&crop),
            edge,
        }
    }

    /// Overlays for every replaced base face, in base-face order.
    ///
    /// Faces bound to themselves need no overlay and are skipped.
    pub fn compose_all(
        &self,
        base_faces: &[Face],
        binding: &SelectionBinding,
    ) -> Vec<CompositeOverlay> {
        let overlays: Vec<CompositeOverlay> = base_faces
            .iter()
            .filter_map(|dest| {
                let source = binding.get(&dest.face_id)?;
                (source.face_id != dest.face_id)
                    .then(|| self.overlay(&dest.face_id, &dest.region, source))
            })
            .collect();

        log::debug!(
            "composed {} overlays for {} base faces",
            overlays.len(),
            base_faces.len()
        );
        overlays
    }
}
