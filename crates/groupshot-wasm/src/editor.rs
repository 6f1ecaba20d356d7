//! Face box editing bindings.
//!
//! `JsFaceEditor` owns the working set of faces for the box adjustment
//! screen. Each committed gesture, addition or deletion swaps in a new
//! snapshot; `version` tells the UI when to re-render.

use crate::composite::box_style;
use crate::types::{client_point, from_js, now_stamp, parse_config, rect_from_dom, to_js};
use groupshot_core::{
    BoxEditor, EditorPhase, Face, FaceCollection, FaceId, GestureTarget, RegionUpdate,
};
use wasm_bindgen::prelude::*;
use web_sys::DomRect;

/// Working set of faces plus the drag/resize state machine.
#[wasm_bindgen]
pub struct JsFaceEditor {
    faces: FaceCollection,
    editor: BoxEditor,
}

#[wasm_bindgen]
impl JsFaceEditor {
    /// Create an editor over stored face records.
    ///
    /// # Arguments
    /// * `faces` - Array of face records (`face_id`, `photo_url`, `coordinates`)
    /// * `config` - Optional geometry config (`minDim`, `closureRadiusPx`, ...)
    #[wasm_bindgen(constructor)]
    pub fn new(faces: JsValue, config: Option<JsValue>) -> Result<JsFaceEditor, JsValue> {
        let config = parse_config(config)?;
        let faces: Vec<Face> = from_js(faces, "faces")?;
        Ok(JsFaceEditor {
            faces: FaceCollection::new(faces),
            editor: BoxEditor::new(config),
        })
    }

    /// Snapshot version; increases on every change.
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u64 {
        self.faces.version()
    }

    /// Current faces as records.
    pub fn faces(&self) -> Result<JsValue, JsValue> {
        to_js(self.faces.faces())
    }

    /// Faces on one photo as records.
    pub fn faces_for_photo(&self, photo_url: &str) -> Result<JsValue, JsValue> {
        let faces: Vec<&Face> = self.faces.for_photo(photo_url).collect();
        to_js(&faces)
    }

    /// `"idle"`, `"dragging"` or `"resizing"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        match self.editor.phase() {
            EditorPhase::Idle => "idle",
            EditorPhase::Dragging => "dragging",
            EditorPhase::Resizing => "resizing",
        }
        .to_string()
    }

    /// Start a gesture on a face box. `on_handle` selects resize over drag.
    pub fn pointer_down(
        &mut self,
        face_id: &str,
        on_handle: bool,
        client_x: f64,
        client_y: f64,
    ) -> bool {
        let target = if on_handle {
            GestureTarget::ResizeHandle
        } else {
            GestureTarget::Body
        };
        let pointer = client_point(client_x, client_y);
        self.editor
            .pointer_down(&self.faces, &FaceId::from(face_id), target, pointer)
    }

    /// Move the active gesture; returns the candidate region or `null`.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        container: &DomRect,
    ) -> Result<JsValue, JsValue> {
        match self
            .editor
            .pointer_move(client_point(client_x, client_y), rect_from_dom(container))
        {
            Some(region) => to_js(&region),
            None => Ok(JsValue::NULL),
        }
    }

    /// End the gesture and commit it. Returns whether a face changed.
    pub fn pointer_up(&mut self) -> bool {
        let update = self.editor.pointer_up();
        self.commit(update)
    }

    /// Pointer-cancel commits like pointer-up.
    pub fn pointer_cancel(&mut self) -> bool {
        let update = self.editor.pointer_cancel();
        self.commit(update)
    }

    /// Inline style for a face box, using the in-progress region while the
    /// face is being dragged or resized.
    pub fn box_style(&self, face_id: &str) -> Option<String> {
        let face_id = FaceId::from(face_id);
        let region = match self.editor.preview() {
            Some(preview) if preview.face_id == face_id => preview.region,
            _ => self.faces.get(&face_id)?.region,
        };
        Some(box_style(&region))
    }

    /// Add a manual face at the default box on `photo_url`; returns its id.
    pub fn add_face(&mut self, photo_url: &str) -> String {
        let (faces, face_id) = self.editor.add_face(&self.faces, photo_url, now_stamp());
        self.faces = faces;
        face_id.to_string()
    }

    pub fn delete_face(&mut self, face_id: &str) {
        self.faces = self.editor.delete(&self.faces, &FaceId::from(face_id));
    }
}

impl JsFaceEditor {
    fn commit(&mut self, update: Option<RegionUpdate>) -> bool {
        match update {
            Some(update) => {
                let before = self.faces.version();
                self.faces = self.faces.apply(&update);
                self.faces.version() != before
            }
            None => false,
        }
    }
}
