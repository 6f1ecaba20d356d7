//! Groupshot Core - Face region geometry and compositing engine
//!
//! This crate holds everything Groupshot computes about faces: the
//! percentage-space region model, the drag/resize box editor, the lasso
//! capture tool, per-face replacement selection across photos, and the
//! declarative overlay transforms used to preview a composite.
//!
//! Nothing here touches pixels. Pointer input arrives in pixels and is
//! converted once, at the boundary, into percent of the displayed photo.

pub mod composite;
pub mod config;
pub mod detect;
pub mod editor;
pub mod error;
pub mod face;
pub mod geometry;
pub mod lasso;
pub mod mask;
pub mod selection;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use composite::{BackgroundTransform, CompositeOverlay, CompositeRenderer, EdgeTreatment};
pub use config::GeometryConfig;
pub use detect::{collect_detections, detected_face_id, FaceDetector};
pub use editor::{BoxEditor, EditorPhase, GestureTarget, RegionUpdate};
pub use error::{GroupshotError, Result};
pub use face::{Face, FaceCollection, FaceId, FaceSource, SourceKind};
pub use geometry::{
    bounding_box, fit_image, polygon_contains, PercentPoint, PixelPoint, PixelRect, PixelSize,
    Region,
};
pub use lasso::{LassoCapture, LassoEvent, LassoPhase, LassoSelection};
pub use selection::{SelectionBinding, SelectionController};
pub use session::{PhotoSession, SessionStatus, SessionStore, SessionUpdate, UploadedPhoto};
