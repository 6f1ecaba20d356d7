//! Session record transitions.
//!
//! Each function takes the current session record and returns the patch the
//! UI should hand to its store; nothing here writes storage itself.

use crate::types::{from_js, to_js, to_js_error};
use groupshot_core::{collect_detections, Face, FaceCollection, FaceDetector, PhotoSession};
use wasm_bindgen::prelude::*;

/// Detector output already fetched by the UI.
struct Prefetched(Vec<Face>);

impl FaceDetector for Prefetched {
    fn detect(&self, _photo_urls: &[String]) -> groupshot_core::Result<Vec<Face>> {
        Ok(self.0.clone())
    }
}

/// Accept detector output; throws when no face was found on any photo.
#[wasm_bindgen]
pub fn record_detections(session: JsValue, faces: JsValue) -> Result<JsValue, JsValue> {
    let session: PhotoSession = from_js(session, "session")?;
    let faces: Vec<Face> = from_js(faces, "faces")?;
    let faces =
        collect_detections(&Prefetched(faces), &session.photo_urls()).map_err(to_js_error)?;
    to_js(&session.record_detections(&faces))
}

/// Store adjusted faces and move on to base photo selection.
#[wasm_bindgen]
pub fn commit_faces(session: JsValue, faces: JsValue) -> Result<JsValue, JsValue> {
    let session: PhotoSession = from_js(session, "session")?;
    let faces: Vec<Face> = from_js(faces, "faces")?;
    to_js(&session.commit_faces(&FaceCollection::new(faces)))
}

/// Flag the base photo and start face selection.
#[wasm_bindgen]
pub fn choose_base(session: JsValue, photo_url: &str) -> Result<JsValue, JsValue> {
    let session: PhotoSession = from_js(session, "session")?;
    let update = session.choose_base(photo_url).map_err(to_js_error)?;
    to_js(&update)
}

/// Patch completing a merged session, or `null` when it is not merging.
#[wasm_bindgen]
pub fn complete_session(session: JsValue) -> Result<JsValue, JsValue> {
    let session: PhotoSession = from_js(session, "session")?;
    match session.complete() {
        Some(update) => to_js(&update),
        None => Ok(JsValue::NULL),
    }
}
