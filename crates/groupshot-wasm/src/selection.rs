//! Replacement selection bindings.

use crate::composite::styles;
use crate::types::{from_js, parse_config, to_js, to_js_error};
use groupshot_core::{
    CompositeRenderer, Face, FaceCollection, FaceId, GroupshotError, PhotoSession,
    SelectionController, SessionStore, SessionUpdate,
};
use wasm_bindgen::prelude::*;

/// Per-face replacement picking for one base photo.
#[wasm_bindgen]
pub struct JsSelectionController {
    controller: SelectionController,
    renderer: CompositeRenderer,
}

#[wasm_bindgen]
impl JsSelectionController {
    /// Create a controller over all session faces.
    ///
    /// # Arguments
    /// * `faces` - Every face record of the session
    /// * `base_photo_url` - The chosen base photo
    /// * `config` - Optional geometry config
    #[wasm_bindgen(constructor)]
    pub fn new(
        faces: JsValue,
        base_photo_url: String,
        config: Option<JsValue>,
    ) -> Result<JsSelectionController, JsValue> {
        let config = parse_config(config)?;
        let faces: Vec<Face> = from_js(faces, "faces")?;
        Ok(JsSelectionController {
            controller: SelectionController::new(&FaceCollection::new(faces), base_photo_url),
            renderer: CompositeRenderer::new(config),
        })
    }

    pub fn base_faces(&self) -> Result<JsValue, JsValue> {
        to_js(self.controller.base_faces())
    }

    pub fn other_faces(&self) -> Result<JsValue, JsValue> {
        to_js(self.controller.other_faces())
    }

    /// Current binding as a plain object keyed by base face id.
    pub fn binding(&self) -> Result<JsValue, JsValue> {
        to_js(self.controller.binding())
    }

    /// Bind `candidate` in place of `base_face_id`; unknown ids are ignored.
    pub fn select_replacement(
        &mut self,
        base_face_id: &str,
        candidate: JsValue,
    ) -> Result<bool, JsValue> {
        let candidate: Face = from_js(candidate, "candidate face")?;
        Ok(self
            .controller
            .select_replacement(&FaceId::from(base_face_id), candidate))
    }

    pub fn is_replaced(&self, face_id: &str) -> bool {
        self.controller.is_replaced(&FaceId::from(face_id))
    }

    #[wasm_bindgen(getter)]
    pub fn replaced_count(&self) -> usize {
        self.controller.replaced_count()
    }

    /// One candidate face per other photo for `base_face_id`.
    pub fn candidates_for(
        &self,
        base_face_id: &str,
        photo_urls: Vec<String>,
    ) -> Result<JsValue, JsValue> {
        let candidates = self
            .controller
            .candidates_for(&FaceId::from(base_face_id), &photo_urls)
            .map_err(to_js_error)?;
        to_js(&candidates)
    }

    /// Overlay styles for the faces replaced so far.
    pub fn overlays(&self) -> Result<JsValue, JsValue> {
        to_js(&styles(
            &self.renderer,
            self.controller.base_faces(),
            self.controller.binding(),
        ))
    }

    /// Persist the binding and move the session to `merging`.
    ///
    /// `update` is called as `update(sessionId, patch)` with the record patch
    /// and may throw to report a storage failure.
    pub fn finalize(&self, session_id: &str, update: js_sys::Function) -> Result<JsValue, JsValue> {
        let mut store = CallbackStore { update };
        let binding = self
            .controller
            .finalize(&mut store, session_id)
            .map_err(to_js_error)?;
        to_js(&binding)
    }
}

/// Write-only store backed by a JS callback.
struct CallbackStore {
    update: js_sys::Function,
}

impl SessionStore for CallbackStore {
    fn get(&self, session_id: &str) -> groupshot_core::Result<PhotoSession> {
        Err(GroupshotError::SessionNotFound(session_id.to_string()))
    }

    fn update(&mut self, session_id: &str, update: SessionUpdate) -> groupshot_core::Result<()> {
        let patch = to_js(&update).map_err(|e| GroupshotError::Storage(describe(&e)))?;
        self.update
            .call2(&JsValue::NULL, &JsValue::from_str(session_id), &patch)
            .map(|_| ())
            .map_err(|e| GroupshotError::Storage(describe(&e)))
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use groupshot_core::{Region, SelectionBinding, SessionStatus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn session_faces() -> Vec<Face> {
        vec![
            Face::detected("a.jpg-face-0", "a.jpg", Region::new(10.0, 10.0, 15.0, 20.0)),
            Face::detected("a.jpg-face-1", "a.jpg", Region::new(40.0, 10.0, 15.0, 20.0)),
            Face::detected("b.jpg-face-0", "b.jpg", Region::new(12.0, 11.0, 15.0, 20.0)),
            Face::detected("b.jpg-face-1", "b.jpg", Region::new(42.0, 11.0, 15.0, 20.0)),
        ]
    }

    fn controller() -> JsSelectionController {
        JsSelectionController::new(to_js(&session_faces()).unwrap(), "a.jpg".to_string(), None)
            .unwrap()
    }

    fn b_face(index: usize) -> JsValue {
        to_js(&session_faces()[2 + index]).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_select_replacement_marks_only_that_face() {
        let mut controller = controller();
        assert_eq!(controller.replaced_count(), 0);

        assert!(controller.select_replacement("a.jpg-face-1", b_face(1)).unwrap());
        assert!(controller.is_replaced("a.jpg-face-1"));
        assert!(!controller.is_replaced("a.jpg-face-0"));
        assert_eq!(controller.replaced_count(), 1);

        let binding: SelectionBinding = from_js(controller.binding().unwrap(), "binding").unwrap();
        assert_eq!(binding.len(), 2);
    }

    #[wasm_bindgen_test]
    fn test_unknown_base_face_ignored() {
        let mut controller = controller();
        assert!(!controller.select_replacement("nope", b_face(0)).unwrap());
        assert_eq!(controller.replaced_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_candidates_pick_overlapping_face() {
        let controller = controller();
        let candidates: Vec<Face> = from_js(
            controller
                .candidates_for("a.jpg-face-1", vec!["b.jpg".to_string()])
                .unwrap(),
            "candidates",
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].face_id.as_str(), "b.jpg-face-1");

        assert!(controller
            .candidates_for("missing", vec!["b.jpg".to_string()])
            .is_err());
    }

    #[wasm_bindgen_test]
    fn test_overlays_follow_binding() {
        let mut controller = controller();
        let none: Vec<crate::OverlayStyle> =
            from_js(controller.overlays().unwrap(), "overlays").unwrap();
        assert!(none.is_empty());

        controller.select_replacement("a.jpg-face-0", b_face(0)).unwrap();
        let one: Vec<crate::OverlayStyle> =
            from_js(controller.overlays().unwrap(), "overlays").unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].dest_face_id, "a.jpg-face-0");
        assert_eq!(one[0].background_image, "url(\"b.jpg\")");
    }

    #[wasm_bindgen_test]
    fn test_finalize_writes_patch_through_callback() {
        let mut controller = controller();
        controller.select_replacement("a.jpg-face-0", b_face(0)).unwrap();

        let calls: Rc<RefCell<Vec<(String, JsValue)>>> = Rc::default();
        let sink = Rc::clone(&calls);
        let callback = Closure::wrap(Box::new(move |id: JsValue, patch: JsValue| {
            sink.borrow_mut()
                .push((id.as_string().unwrap_or_default(), patch));
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        let binding = controller
            .finalize("s1", callback.as_ref().unchecked_ref::<js_sys::Function>().clone())
            .unwrap();
        let binding: SelectionBinding = from_js(binding, "binding").unwrap();
        assert!(binding.is_replaced(&FaceId::from("a.jpg-face-0")));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "s1");
        let patch: SessionUpdate = from_js(calls[0].1.clone(), "patch").unwrap();
        assert_eq!(patch.status, Some(SessionStatus::Merging));
        assert_eq!(patch.final_composition, Some(binding));
    }

    #[wasm_bindgen_test]
    fn test_throwing_callback_is_storage_failure() {
        let controller = controller();
        let callback =
            js_sys::Function::new_with_args("id, patch", "throw 'quota exceeded';");

        let err = controller.finalize("s1", callback).unwrap_err();
        let message = err.as_string().unwrap();
        assert!(message.starts_with("Session storage failed"), "{}", message);
        assert!(message.contains("quota exceeded"), "{}", message);
    }
}
