// Helpers mínimos sobre valores JS

use wasm_bindgen::{JsCast, JsValue};

/// Extrae un mensaje legible de un error llegado de JS. Los DOMException y
/// Error traen .message; para cualquier otro valor cae al Debug de JsValue.
pub fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(text) = err.as_string() {
        return text;
    }
    format!("{:?}", err)
}
