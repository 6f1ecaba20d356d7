//! Conversions at the JavaScript boundary.
//!
//! Everything crosses as plain JS objects via serde-wasm-bindgen. Maps are
//! serialized JSON-compatible (plain objects, not `Map`) so that values can
//! be stored or posted without further conversion.

use groupshot_core::{GeometryConfig, GroupshotError, PixelPoint, PixelRect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::DomRect;

/// Convert a core error into a JS exception value.
pub(crate) fn to_js_error(err: GroupshotError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize a value into a plain JS object.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Deserialize a JS value, naming `what` in the error.
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Read optional camelCase config from JS; missing fields keep defaults.
pub(crate) fn parse_config(config: Option<JsValue>) -> Result<GeometryConfig, JsValue> {
    let config = match config {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            from_js::<GeometryConfig>(value, "config")?
        }
        _ => GeometryConfig::default(),
    };
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

/// Rendered rectangle from `element.getBoundingClientRect()`.
pub(crate) fn rect_from_dom(rect: &DomRect) -> PixelRect {
    PixelRect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

pub(crate) fn client_point(client_x: f64, client_y: f64) -> PixelPoint {
    PixelPoint::new(client_x, client_y)
}

/// Millisecond timestamp used to stamp interactively created face ids.
pub(crate) fn now_stamp() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}
