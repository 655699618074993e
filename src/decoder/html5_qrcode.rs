// ============================================================================
// HTML5-QRCODE ADAPTER - Decodificación con la librería html5-qrcode.
// A diferencia de zxing, esta librería monta su propio <video> dentro de un
// contenedor; el shim JS resuelve el contenedor a partir del id del widget.
// ============================================================================

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::utils::{describe_js_error, html5_qrcode_ffi};

use super::traits::{DecoderCallbacks, DecoderControls, DecoderHandle, DecoderRequest, QrDecoder};

/// Lado del recuadro de enfoque que pinta la librería (px)
const QRBOX_SIZE_PX: u32 = 250;

/// Configuración que espera Html5Qrcode.start()
#[derive(Serialize)]
struct Html5QrcodeConfig {
    fps: u32,
    qrbox: u32,
}

impl Html5QrcodeConfig {
    fn for_request(request: &DecoderRequest) -> Self {
        // La librería piensa en frames por segundo, no en intervalo
        let fps = (1000 / request.scan_interval_ms.max(1)).max(1);
        Self {
            fps,
            qrbox: QRBOX_SIZE_PX,
        }
    }
}

#[derive(Default)]
pub struct Html5QrcodeDecoder;

impl Html5QrcodeDecoder {
    pub fn new() -> Self {
        Self
    }
}

struct Html5QrcodeControls;

impl DecoderControls for Html5QrcodeControls {
    fn stop(&self) -> Result<(), String> {
        html5_qrcode_ffi::stop_html5_qrcode_scanner().map_err(|e| describe_js_error(&e))
    }
}

impl QrDecoder for Html5QrcodeDecoder {
    fn name(&self) -> &'static str {
        "html5-qrcode"
    }

    fn start(
        &self,
        request: &DecoderRequest,
        callbacks: DecoderCallbacks,
    ) -> Result<DecoderHandle, String> {
        let config = Html5QrcodeConfig::for_request(request);
        let config_json = serde_json::to_string(&config)
            .map_err(|e| format!("configuración inválida: {}", e))?;

        let DecoderCallbacks {
            on_attached,
            on_decode,
            on_error,
        } = callbacks;

        let on_decode_closure = Closure::wrap(Box::new(move |payload: JsValue| {
            if let Some(text) = payload.as_string() {
                on_decode(text);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let on_attached_closure = Closure::wrap(Box::new(move |_ready: JsValue| {
            on_attached();
        }) as Box<dyn FnMut(JsValue)>);

        let on_error_closure = Closure::wrap(Box::new(move |error: JsValue| {
            on_error(describe_js_error(&error));
        }) as Box<dyn FnMut(JsValue)>);

        log::info!(
            "📷 [HTML5-QRCODE] Arrancando scanner en #{} (device {})",
            request.video_element_id,
            request.device_id
        );

        html5_qrcode_ffi::start_html5_qrcode_scanner(
            &request.device_id,
            &request.video_element_id,
            &config_json,
            on_decode_closure.as_ref().unchecked_ref(),
            on_attached_closure.as_ref().unchecked_ref(),
            on_error_closure.as_ref().unchecked_ref(),
        );

        // Mantener closures vivos; la librería puede invocarlos en cualquier momento
        on_decode_closure.forget();
        on_attached_closure.forget();
        on_error_closure.forget();

        Ok(DecoderHandle::new("html5-qrcode", Box::new(Html5QrcodeControls)))
    }
}
