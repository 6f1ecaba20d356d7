//! Lasso capture bindings.

use crate::types::{
    client_point, from_js, now_stamp, parse_config, rect_from_dom, to_js, to_js_error,
};
use groupshot_core::{
    Face, FaceCollection, LassoCapture, LassoEvent, LassoPhase, PixelPoint, PixelSize,
};
use wasm_bindgen::prelude::*;
use web_sys::DomRect;

/// Freehand selection over one displayed photo.
#[wasm_bindgen]
pub struct JsLassoCapture {
    capture: LassoCapture,
}

#[wasm_bindgen]
impl JsLassoCapture {
    /// Create a capture for an image shown letterboxed in its container.
    ///
    /// # Arguments
    /// * `container_width`, `container_height` - Rendered container size
    /// * `natural_width`, `natural_height` - The image's natural size
    /// * `config` - Optional geometry config
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_width: f64,
        container_height: f64,
        natural_width: f64,
        natural_height: f64,
        config: Option<JsValue>,
    ) -> Result<JsLassoCapture, JsValue> {
        let config = parse_config(config)?;
        let capture = LassoCapture::new(
            PixelSize::new(container_width, container_height),
            PixelSize::new(natural_width, natural_height),
            config,
        );
        Ok(JsLassoCapture { capture })
    }

    /// `"empty"`, `"tracing"` or `"closed"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.capture.phase()).to_string()
    }

    /// Rendered image rectangle inside the container, in pixels.
    pub fn image_rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.capture.image_rect())
    }

    /// Returns `"ignored"`, `"point_added"` or `"closed"`.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, container: &DomRect) -> String {
        let event = self
            .capture
            .pointer_down(client_point(client_x, client_y), rect_from_dom(container));
        event_name(event).to_string()
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, container: &DomRect) -> String {
        let event = self
            .capture
            .pointer_move(client_point(client_x, client_y), rect_from_dom(container));
        event_name(event).to_string()
    }

    pub fn pointer_up(&mut self) {
        self.capture.pointer_up();
    }

    pub fn reset(&mut self) {
        self.capture.reset();
    }

    /// SVG `points` attribute for the trace drawn so far.
    pub fn svg_points(&self) -> String {
        svg_points(self.capture.points())
    }

    /// Finish the selection as a lasso face record on `photo_url`.
    ///
    /// `faces` are the session's current face records; the new id never
    /// collides with one of them. Throws unless the trace has been closed.
    pub fn confirm(&self, photo_url: &str, faces: JsValue) -> Result<JsValue, JsValue> {
        let faces: Vec<Face> = from_js(faces, "faces")?;
        let (faces, face_id) = self
            .capture
            .confirm_into(&FaceCollection::new(faces), photo_url, now_stamp())
            .map_err(to_js_error)?;
        match faces.get(&face_id) {
            Some(face) => to_js(face),
            None => Err(JsValue::from_str("Lasso face missing after confirm")),
        }
    }
}

pub(crate) fn phase_name(phase: LassoPhase) -> &'static str {
    match phase {
        LassoPhase::Empty => "empty",
        LassoPhase::Tracing => "tracing",
        LassoPhase::Closed => "closed",
    }
}

pub(crate) fn event_name(event: LassoEvent) -> &'static str {
    match event {
        LassoEvent::Ignored => "ignored",
        LassoEvent::PointAdded => "point_added",
        LassoEvent::Closed => "closed",
    }
}

/// Space-separated `x,y` pairs, one decimal place.
pub(crate) fn svg_points(points: &[PixelPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
