//! Drag and resize editing of face boxes.
//!
//! The editor recognizes one gesture at a time. A gesture starts on
//! pointer-down over a box body (drag) or its resize handle (resize) and ends
//! on pointer-up or pointer-cancel, both of which commit the last clamped
//! region. Every pointer-move recomputes the candidate from the region the
//! gesture started with, so rounding never accumulates across frames.
//!
//! # Example
//!
//! ```ignore
//! let mut editor = BoxEditor::new(GeometryConfig::default());
//! editor.pointer_down(&faces, &face_id, GestureTarget::Body, PixelPoint::new(100.0, 80.0));
//! editor.pointer_move(PixelPoint::new(140.0, 80.0), container);
//! if let Some(update) = editor.pointer_up() {
//!     faces = faces.apply(&update);
//! }
//! ```

use crate::config::GeometryConfig;
use crate::face::{Face, FaceCollection, FaceId, MANUAL_PREFIX};
use crate::geometry::{PixelPoint, PixelRect, Region};
use serde::{Deserialize, Serialize};

/// Part of a face box that received the pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureTarget {
    /// The box body: moves the box.
    Body,
    /// The bottom-right handle: resizes the box.
    ResizeHandle,
}

/// Observable editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPhase {
    Idle,
    Dragging,
    Resizing,
}

/// Committed result of a gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionUpdate {
    pub face_id: FaceId,
    pub region: Region,
}

#[derive(Debug, Clone)]
struct Gesture {
    target: GestureTarget,
    face_id: FaceId,
    /// Viewport position of the pointer-down
    origin: PixelPoint,
    /// Region at pointer-down; every move is computed from this
    initial: Region,
    /// Last clamped candidate
    current: Region,
}

/// Gesture state machine over the boxes of a [`FaceCollection`].
#[derive(Debug, Clone)]
pub struct BoxEditor {
    config: GeometryConfig,
    gesture: Option<Gesture>,
}

impl Default for BoxEditor {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}

impl BoxEditor {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            gesture: None,
        }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn phase(&self) -> EditorPhase {
        match &self.gesture {
            None => EditorPhase::Idle,
            Some(g) if g.target == GestureTarget::Body => EditorPhase::Dragging,
            Some(_) => EditorPhase::Resizing,
        }
    }

    /// Face currently being dragged or resized.
    pub fn active_face(&self) -> Option<&FaceId> {
        self.gesture.as_ref().map(|g| &g.face_id)
    }

    /// Region to render for the active face while a gesture is in progress.
    pub fn preview(&self) -> Option<RegionUpdate> {
        self.gesture.as_ref().map(|g| RegionUpdate {
            face_id: g.face_id.clone(),
            region: g.current,
        })
    }

    /// Begin a drag or resize.
    ///
    /// Returns `false` (and changes nothing) when a gesture is already active
    /// or the face is not in the collection.
    pub fn pointer_down(
        &mut self,
        faces: &FaceCollection,
        face_id: &FaceId,
        target: GestureTarget,
        pointer: PixelPoint,
    ) -> bool {
        if let Some(active) = &self.gesture {
            log::debug!(
                "ignoring pointer-down on {} while {} is active",
                face_id,
                active.face_id
            );
            return false;
        }

        let Some(face) = faces.get(face_id) else {
            log::debug!("ignoring pointer-down on unknown face {}", face_id);
            return false;
        };

        // Detector boxes are stored verbatim; edits start from a valid one
        let initial = face.region.normalized(self.config.min_dim);
        log::debug!("{:?} gesture started on {}", target, face_id);
        self.gesture = Some(Gesture {
            target,
            face_id: face_id.clone(),
            origin: pointer,
            initial,
            current: initial,
        });
        true
    }

    /// Recompute the candidate region for the current pointer position.
    ///
    /// `container` is the rendered rectangle of the photo the box sits on,
    /// measured at the time of this event. Returns the clamped candidate, or
    /// `None` when idle.
    pub fn pointer_move(&mut self, pointer: PixelPoint, container: PixelRect) -> Option<Region> {
        let min_dim = self.config.min_dim;
        let gesture = self.gesture.as_mut()?;

        let (dx, dy) =
            container.delta_to_percent(pointer.x - gesture.origin.x, pointer.y - gesture.origin.y);

        gesture.current = match gesture.target {
            GestureTarget::Body => gesture.initial.clamp_move(dx, dy),
            GestureTarget::ResizeHandle => gesture.initial.clamp_resize(dx, dy, min_dim),
        };
        Some(gesture.current)
    }

    /// End the gesture and commit the last candidate.
    pub fn pointer_up(&mut self) -> Option<RegionUpdate> {
        let gesture = self.gesture.take()?;
        log::debug!(
            "{:?} gesture committed on {}: {:?}",
            gesture.target,
            gesture.face_id,
            gesture.current
        );
        Some(RegionUpdate {
            face_id: gesture.face_id,
            region: gesture.current,
        })
    }

    /// Pointer-cancel (e.g. focus loss) commits exactly like pointer-up.
    pub fn pointer_cancel(&mut self) -> Option<RegionUpdate> {
        if let Some(g) = &self.gesture {
            log::debug!("gesture on {} interrupted, committing last state", g.face_id);
        }
        self.pointer_up()
    }

    /// Insert a manual face at the configured default region.
    pub fn add_face(
        &self,
        faces: &FaceCollection,
        photo_url: &str,
        stamp: u64,
    ) -> (FaceCollection, FaceId) {
        let face_id = faces.unique_id(MANUAL_PREFIX, stamp);
        let face = Face::manual(face_id.clone(), photo_url, self.config.default_region);
        (faces.with_face(face), face_id)
    }

    /// Remove a face. A gesture on that face is dropped without committing.
    pub fn delete(&mut self, faces: &FaceCollection, face_id: &FaceId) -> FaceCollection {
        if self.active_face() == Some(face_id) {
            self.gesture = None;
        }
        faces.without(face_id)
    }
}

impl FaceCollection {
    /// Apply a committed editor update.
    pub fn apply(&self, update: &RegionUpdate) -> FaceCollection {
        self.with_region(&update.face_id, update.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceSource;

    fn container() -> PixelRect {
        // 400x200 box at (50, 50) in the viewport: 4px = 1% horizontally, 2px = 1% vertically
        PixelRect::new(50.0, 50.0, 400.0, 200.0)
    }

    fn faces() -> FaceCollection {
        FaceCollection::new(vec![
            Face::detected("f1", "a.jpg", Region::new(10.0, 10.0, 20.0, 20.0)),
            Face::detected("f2", "a.jpg", Region::new(60.0, 60.0, 20.0, 20.0)),
        ])
    }

    #[test]
    fn test_drag_commits_clamped_region() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();

        assert!(editor.pointer_down(
            &faces,
            &id,
            GestureTarget::Body,
            PixelPoint::new(100.0, 100.0)
        ));
        assert_eq!(editor.phase(), EditorPhase::Dragging);

        // +40px = +10%, +20px = +10%
        let candidate = editor.pointer_move(PixelPoint::new(140.0, 120.0), container());
        assert_eq!(candidate, Some(Region::new(20.0, 20.0, 20.0, 20.0)));

        let update = editor.pointer_up().unwrap();
        assert_eq!(update.region, Region::new(20.0, 20.0, 20.0, 20.0));
        assert_eq!(editor.phase(), EditorPhase::Idle);

        let next = faces.apply(&update);
        assert_eq!(next.get(&id).unwrap().region.x, 20.0);
        assert_eq!(next.version(), 1);
    }

    #[test]
    fn test_drag_recomputes_from_start() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::new(100.0, 100.0));

        // Wander far off the edge and back: no drift from intermediate clamping
        editor.pointer_move(PixelPoint::new(-2000.0, -2000.0), container());
        editor.pointer_move(PixelPoint::new(3000.0, 3000.0), container());
        let back = editor.pointer_move(PixelPoint::new(100.0, 100.0), container());
        assert_eq!(back, Some(Region::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_drag_clamps_at_edges() {
        let faces = faces();
        let id = FaceId::from("f2");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::new(0.0, 0.0));

        let candidate = editor.pointer_move(PixelPoint::new(1000.0, 1000.0), container()).unwrap();
        assert_eq!(candidate, Region::new(80.0, 80.0, 20.0, 20.0));
    }

    #[test]
    fn test_resize_respects_min_dim() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        assert!(editor.pointer_down(
            &faces,
            &id,
            GestureTarget::ResizeHandle,
            PixelPoint::new(0.0, 0.0)
        ));
        assert_eq!(editor.phase(), EditorPhase::Resizing);

        let shrunk = editor.pointer_move(PixelPoint::new(-400.0, -400.0), container()).unwrap();
        assert_eq!(shrunk, Region::new(10.0, 10.0, 5.0, 5.0));

        let grown = editor.pointer_move(PixelPoint::new(40.0, 20.0), container()).unwrap();
        assert_eq!(grown, Region::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn test_resize_of_overhanging_detection_commits_valid_region() {
        let faces = FaceCollection::new(vec![Face::detected(
            "edge",
            "a.jpg",
            Region::new(97.0, 10.0, 10.0, 10.0),
        )]);
        let id = FaceId::from("edge");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::ResizeHandle, PixelPoint::new(0.0, 0.0));
        editor.pointer_move(PixelPoint::new(-4.0, 0.0), container());

        let update = editor.pointer_up().unwrap();
        assert!(update.region.is_valid(5.0), "{:?}", update.region);
        assert!(update.region.right() <= 100.0);
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let faces = faces();
        let mut editor = BoxEditor::default();
        assert!(editor.pointer_down(
            &faces,
            &FaceId::from("f1"),
            GestureTarget::Body,
            PixelPoint::default()
        ));
        assert!(!editor.pointer_down(
            &faces,
            &FaceId::from("f2"),
            GestureTarget::ResizeHandle,
            PixelPoint::default()
        ));
        assert_eq!(editor.active_face(), Some(&FaceId::from("f1")));
        assert_eq!(editor.phase(), EditorPhase::Dragging);
    }

    #[test]
    fn test_unknown_face_not_started() {
        let mut editor = BoxEditor::default();
        assert!(!editor.pointer_down(
            &faces(),
            &FaceId::from("zz"),
            GestureTarget::Body,
            PixelPoint::default()
        ));
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn test_cancel_commits_last_state() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::new(0.0, 0.0));
        editor.pointer_move(PixelPoint::new(20.0, 0.0), container());

        let update = editor.pointer_cancel().unwrap();
        assert_eq!(update.region, Region::new(15.0, 10.0, 20.0, 20.0));
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn test_up_without_move_commits_initial() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::new(5.0, 5.0));
        let update = editor.pointer_up().unwrap();
        assert_eq!(update.region, faces.get(&id).unwrap().region);
    }

    #[test]
    fn test_idle_events_are_noops() {
        let mut editor = BoxEditor::default();
        assert_eq!(editor.pointer_move(PixelPoint::new(1.0, 1.0), container()), None);
        assert_eq!(editor.pointer_up(), None);
        assert_eq!(editor.pointer_cancel(), None);
    }

    #[test]
    fn test_add_face_uses_default_region() {
        let editor = BoxEditor::default();
        let (next, id) = editor.add_face(&faces(), "b.jpg", 1700000000000);

        let face = next.get(&id).unwrap();
        assert_eq!(id.as_str(), "manual-1700000000000");
        assert_eq!(face.photo_url, "b.jpg");
        assert_eq!(face.region, Region::new(25.0, 25.0, 20.0, 25.0));
        assert_eq!(face.source, FaceSource::Manual);
        assert!(face.region.is_valid(editor.config().min_dim));
        assert_eq!(next.len(), 3);
    }

    #[test]
    fn test_delete_drops_active_gesture() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::default());

        let next = editor.delete(&faces, &id);
        assert!(!next.contains(&id));
        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert_eq!(editor.pointer_up(), None);
    }

    #[test]
    fn test_zero_size_container_means_no_motion() {
        let faces = faces();
        let id = FaceId::from("f1");
        let mut editor = BoxEditor::default();
        editor.pointer_down(&faces, &id, GestureTarget::Body, PixelPoint::default());
        let candidate = editor.pointer_move(PixelPoint::new(50.0, 50.0), PixelRect::default());
        assert_eq!(candidate, Some(Region::new(10.0, 10.0, 20.0, 20.0)));
    }
}
