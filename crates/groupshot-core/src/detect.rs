//! Face detection collaborator.
//!
//! Detection itself runs elsewhere. Detector output is trusted to already be
//! in percentage space and is never rescaled; records whose coordinates are
//! not even numbers are dropped.

use crate::error::{GroupshotError, Result};
use crate::face::{Face, FaceCollection, FaceId};

/// Anything that can find faces in a batch of photos.
pub trait FaceDetector {
    fn detect(&self, photo_urls: &[String]) -> Result<Vec<Face>>;
}

/// Id of the `index`-th face found on `photo`.
pub fn detected_face_id(photo: &str, index: usize) -> FaceId {
    FaceId::new(format!("{}-face-{}", photo, index))
}

/// Run `detector` over every photo and collect the result as a snapshot.
///
/// Finding no face on any photo is [`GroupshotError::DetectionEmpty`].
pub fn collect_detections<D: FaceDetector + ?Sized>(
    detector: &D,
    photo_urls: &[String],
) -> Result<FaceCollection> {
    let found = detector.detect(photo_urls)?;
    let total = found.len();

    let faces: Vec<Face> = found
        .into_iter()
        .filter(|face| {
            let r = &face.region;
            let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
            if !finite {
                log::warn!("dropping face {} with invalid coordinates {:?}", face.face_id, r);
            }
            finite
        })
        .collect();

    if faces.is_empty() {
        return Err(GroupshotError::DetectionEmpty);
    }

    log::info!(
        "detected {} faces across {} photos ({} dropped)",
        faces.len(),
        photo_urls.len(),
        total - faces.len()
    );
    Ok(FaceCollection::new(faces))
}
