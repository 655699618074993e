// ============================================================================
// ZXING FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Wrappers para el shim de @zxing/browser - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Arranca BrowserQRCodeReader.decodeFromVideoDevice sobre el <video>
    /// indicado. Errores (sincrónicos o del stream) llegan por on_error.
    #[wasm_bindgen(js_name = startZxingScanner)]
    pub fn start_zxing_scanner(
        device_id: &str,
        video_element_id: &str,
        scan_interval_ms: u32,
        on_decode: &js_sys::Function,
        on_attached: &js_sys::Function,
        on_error: &js_sys::Function,
    );

    /// Detiene la instancia activa del reader (si hay) y suelta la cámara
    #[wasm_bindgen(catch, js_name = stopZxingScanner)]
    pub fn stop_zxing_scanner() -> Result<(), JsValue>;
}
