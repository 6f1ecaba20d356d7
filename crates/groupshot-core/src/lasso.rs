//! Freehand lasso capture over a letterboxed photo.
//!
//! The photo is drawn into its container at
//! `scale = min(container_w / natural_w, container_h / natural_h)`, centred.
//! Points are captured in container pixels, but only inside that rendered
//! image rectangle. Tapping near the first point once at least three points
//! exist closes the trace; confirming converts the trace into the photo's
//! percentage space.
//!
//! # State Machine
//!
//! ```text
//! Empty --first point--> Tracing --tap near first point--> Closed
//!   ^                                                        |
//!   +------------------------- reset() ----------------------+
//! ```

use crate::config::GeometryConfig;
use crate::error::{GroupshotError, Result};
use crate::face::{Face, FaceCollection, FaceId, FaceSource, CUSTOM_PREFIX};
use crate::geometry::{
    bounding_box, fit_image, PercentPoint, PixelPoint, PixelRect, PixelSize, Region,
};
use serde::{Deserialize, Serialize};

/// Minimum number of captured points before the trace can close.
pub const MIN_CLOSED_POINTS: usize = 3;

/// Capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LassoPhase {
    Empty,
    Tracing,
    Closed,
}

/// Outcome of feeding one pointer event to the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LassoEvent {
    /// Outside the image, during another stroke, or after closing.
    Ignored,
    /// The point was appended to the trace.
    PointAdded,
    /// The trace closed on this event.
    Closed,
}

/// A confirmed lasso trace in the photo's percentage space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LassoSelection {
    /// Trace vertices, percent of the rendered image
    pub polygon: Vec<PercentPoint>,
    /// Axis-aligned bounds of `polygon` (not normalized)
    pub bounding_box: Region,
}

impl LassoSelection {
    /// Turn the selection into a lasso face on `photo_url`.
    ///
    /// The face region is the bounding box brought into the region
    /// invariant, so a very thin trace still yields a usable box.
    pub fn into_face(self, face_id: FaceId, photo_url: impl Into<String>, min_dim: f64) -> Face {
        Face {
            face_id,
            photo_url: photo_url.into(),
            region: self.bounding_box.normalized(min_dim),
            source: FaceSource::Lasso {
                polygon: self.polygon,
            },
        }
    }
}

/// Pointer-driven polygon capture for one displayed photo.
#[derive(Debug, Clone)]
pub struct LassoCapture {
    config: GeometryConfig,
    /// Rendered image rectangle, container-local pixels
    image_rect: PixelRect,
    /// Captured points, container-local pixels
    points: Vec<PixelPoint>,
    phase: LassoPhase,
    stroke_active: bool,
}

impl LassoCapture {
    /// Start an empty capture for an image of `natural` size shown in a
    /// container of `container` size.
    pub fn new(container: PixelSize, natural: PixelSize, config: GeometryConfig) -> Self {
        let image_rect = fit_image(container, natural);
        log::debug!(
            "lasso image rect {:?} (container {:?}, natural {:?})",
            image_rect,
            container,
            natural
        );
        Self {
            config,
            image_rect,
            points: Vec::new(),
            phase: LassoPhase::Empty,
            stroke_active: false,
        }
    }

    pub fn image_rect(&self) -> PixelRect {
        self.image_rect
    }

    pub fn phase(&self) -> LassoPhase {
        self.phase
    }

    /// Captured points in container-local pixels.
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn is_stroke_active(&self) -> bool {
        self.stroke_active
    }

    /// Handle a pointer-down in viewport pixels over `container`.
    ///
    /// Closes the trace if the point lands within the closure radius of the
    /// first point and enough points exist; otherwise appends the point and
    /// starts a stroke.
    pub fn pointer_down(&mut self, client: PixelPoint, container: PixelRect) -> LassoEvent {
        if self.phase == LassoPhase::Closed || self.stroke_active {
            return LassoEvent::Ignored;
        }

        let point = container.to_local(client);
        if !self.image_rect.contains(point) {
            return LassoEvent::Ignored;
        }

        if self.closes_at(point) {
            log::debug!("lasso closed with {} points", self.points.len());
            self.phase = LassoPhase::Closed;
            return LassoEvent::Closed;
        }

        self.push(point);
        self.stroke_active = true;
        LassoEvent::PointAdded
    }

    /// Handle a pointer-move; only extends an active stroke.
    pub fn pointer_move(&mut self, client: PixelPoint, container: PixelRect) -> LassoEvent {
        if self.phase == LassoPhase::Closed || !self.stroke_active {
            return LassoEvent::Ignored;
        }

        let point = container.to_local(client);
        if !self.image_rect.contains(point) {
            return LassoEvent::Ignored;
        }

        self.push(point);
        LassoEvent::PointAdded
    }

    /// End the current stroke. Captured points are kept.
    pub fn pointer_up(&mut self) {
        self.stroke_active = false;
    }

    /// Discard every point and return to `Empty`.
    pub fn reset(&mut self) {
        self.points.clear();
        self.phase = LassoPhase::Empty;
        self.stroke_active = false;
    }

    /// Whether a container-local point would close the trace.
    pub fn closes_at(&self, point: PixelPoint) -> bool {
        match self.points.first() {
            Some(first) if self.points.len() >= MIN_CLOSED_POINTS => {
                point.distance(first) < self.config.closure_radius_px
            }
            _ => false,
        }
    }

    /// Convert a closed trace into percentage space.
    pub fn confirm(&self) -> Result<LassoSelection> {
        if self.phase != LassoPhase::Closed {
            return Err(GroupshotError::LassoNotClosed {
                points: self.points.len(),
            });
        }

        let polygon: Vec<PercentPoint> = self
            .points
            .iter()
            .map(|p| PercentPoint::from_pixel(*p, &self.image_rect))
            .collect();
        let bounding_box = bounding_box(&polygon);

        Ok(LassoSelection {
            polygon,
            bounding_box,
        })
    }

    /// Confirm the trace and add it to `faces` as a lasso face on `photo_url`.
    ///
    /// The id is `custom-{stamp}`, bumped past any id already in `faces`.
    pub fn confirm_into(
        &self,
        faces: &FaceCollection,
        photo_url: &str,
        stamp: u64,
    ) -> Result<(FaceCollection, FaceId)> {
        let selection = self.confirm()?;
        let face_id = faces.unique_id(CUSTOM_PREFIX, stamp);
        let face = selection.into_face(face_id.clone(), photo_url, self.config.min_dim);
        log::debug!("lasso face {} added on {}", face_id, photo_url);
        Ok((faces.with_face(face), face_id))
    }

    fn push(&mut self, point: PixelPoint) {
        self.points.push(point);
        if self.phase == LassoPhase::Empty {
            self.phase = LassoPhase::Tracing;
        }
    }
}
