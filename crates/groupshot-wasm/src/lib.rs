//! Groupshot WASM - WebAssembly bindings for Groupshot
//!
//! This crate exposes groupshot-core to the browser UI: the face box
//! editor, the lasso tool, per-face replacement selection, and the CSS for
//! composite preview overlays.
//!
//! # Module Structure
//!
//! - `types` - JS boundary helpers (errors, config, DOM rects, serde)
//! - `editor` - Drag/resize editing of face boxes
//! - `lasso` - Freehand lasso capture
//! - `composite` - Overlay CSS rendering
//! - `selection` - Replacement picking and finalization
//! - `session` - Session record transitions and detection intake
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsFaceEditor } from '@groupshot/wasm';
//!
//! await init();
//!
//! const editor = new JsFaceEditor(session.detected_faces);
//! editor.pointer_down(faceId, false, event.clientX, event.clientY);
//! editor.pointer_move(event.clientX, event.clientY, photo.getBoundingClientRect());
//! editor.pointer_up();
//! ```

use wasm_bindgen::prelude::*;

mod composite;
mod editor;
mod lasso;
mod selection;
mod session;
mod types;

pub use composite::{overlay_styles, OverlayStyle};
pub use editor::JsFaceEditor;
pub use lasso::JsLassoCapture;
pub use selection::JsSelectionController;
pub use session::{choose_base, commit_faces, complete_session, record_detections};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // A second init (e.g. hot reload) finds the logger already set
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Groupshot WASM {} ready", version());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
