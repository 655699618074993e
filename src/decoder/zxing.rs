// ============================================================================
// ZXING ADAPTER - Decodificación con @zxing/browser sobre el <video> del
// widget. La librería se adjunta directamente al elemento de video existente.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::utils::{describe_js_error, zxing_ffi};

use super::traits::{DecoderCallbacks, DecoderControls, DecoderHandle, DecoderRequest, QrDecoder};

#[derive(Default)]
pub struct ZxingDecoder;

impl ZxingDecoder {
    pub fn new() -> Self {
        Self
    }
}

struct ZxingControls;

impl DecoderControls for ZxingControls {
    fn stop(&self) -> Result<(), String> {
        zxing_ffi::stop_zxing_scanner().map_err(|e| describe_js_error(&e))
    }
}

impl QrDecoder for ZxingDecoder {
    fn name(&self) -> &'static str {
        "zxing"
    }

    fn start(
        &self,
        request: &DecoderRequest,
        callbacks: DecoderCallbacks,
    ) -> Result<DecoderHandle, String> {
        let DecoderCallbacks {
            on_attached,
            on_decode,
            on_error,
        } = callbacks;

        // Callback cuando se decodifica un frame
        let on_decode_closure = Closure::wrap(Box::new(move |payload: JsValue| {
            if let Some(text) = payload.as_string() {
                on_decode(text);
            }
        }) as Box<dyn FnMut(JsValue)>);

        // Callback cuando el reader quedó adjunto al stream
        let on_attached_closure = Closure::wrap(Box::new(move |_ready: JsValue| {
            on_attached();
        }) as Box<dyn FnMut(JsValue)>);

        // Callback de error fatal
        let on_error_closure = Closure::wrap(Box::new(move |error: JsValue| {
            on_error(describe_js_error(&error));
        }) as Box<dyn FnMut(JsValue)>);

        log::info!(
            "📷 [ZXING] Arrancando reader sobre #{} (device {})",
            request.video_element_id,
            request.device_id
        );

        zxing_ffi::start_zxing_scanner(
            &request.device_id,
            &request.video_element_id,
            request.scan_interval_ms,
            on_decode_closure.as_ref().unchecked_ref(),
            on_attached_closure.as_ref().unchecked_ref(),
            on_error_closure.as_ref().unchecked_ref(),
        );

        // Mantener closures vivos; la librería puede invocarlos en cualquier momento
        on_decode_closure.forget();
        on_attached_closure.forget();
        on_error_closure.forget();

        Ok(DecoderHandle::new("zxing", Box::new(ZxingControls)))
    }
}
