// ============================================================================
// HTML5-QRCODE FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Wrappers para el shim de html5-qrcode - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Arranca Html5Qrcode.start(). `mount_element_id` es el id del <video>
    /// del widget; el shim resuelve el contenedor real y esconde el <video>
    /// mientras la librería monta el suyo. `config_json` lleva la
    /// configuración serializada (fps, qrbox). Errores fatales llegan por
    /// on_error; los "no QR en este frame" se descartan en el shim.
    #[wasm_bindgen(js_name = startHtml5QrcodeScanner)]
    pub fn start_html5_qrcode_scanner(
        device_id: &str,
        mount_element_id: &str,
        config_json: &str,
        on_decode: &js_sys::Function,
        on_attached: &js_sys::Function,
        on_error: &js_sys::Function,
    );

    /// Detiene la instancia activa (si hay) y limpia el contenedor
    #[wasm_bindgen(catch, js_name = stopHtml5QrcodeScanner)]
    pub fn stop_html5_qrcode_scanner() -> Result<(), JsValue>;
}
