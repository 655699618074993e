// ============================================================================
// DECODER TRAITS - Capability interface común para las librerías JS de
// decodificación QR. El controller se escribe una sola vez contra este trait
// y la librería concreta (zxing / html5-qrcode) es un adapter intercambiable.
// ============================================================================

use crate::models::ScanError;

/// Parámetros de arranque que todo decoder recibe
#[derive(Clone, Debug)]
pub struct DecoderRequest {
    /// Id opaco del dispositivo de video seleccionado
    pub device_id: String,
    /// Id del elemento `<video>` (o contenedor) donde montar el stream
    pub video_element_id: String,
    /// Intervalo entre frames analizados (ms); no todas las librerías lo usan
    pub scan_interval_ms: u32,
}

/// Callbacks que el decoder invoca durante la sesión. Los errores por-frame
/// ("no hay QR en este frame") se tragan dentro del adapter: no son fatales
/// y nunca llegan aquí.
pub struct DecoderCallbacks {
    /// El decoder quedó adjunto al stream de cámara (Requesting → Scanning)
    pub on_attached: Box<dyn Fn()>,
    /// Payload QR reconocido en un frame
    pub on_decode: Box<dyn Fn(String)>,
    /// Error fatal arrancando o durante el stream (cámara ocupada, permiso)
    pub on_error: Box<dyn Fn(String)>,
}

/// Control sobre un decoder en ejecución
pub trait DecoderControls {
    /// Detener el análisis de frames y liberar el stream de cámara
    fn stop(&self) -> Result<(), String>;
}

/// Capability interface de decodificación QR
pub trait QrDecoder {
    /// Nombre del motor (para logs)
    fn name(&self) -> &'static str;

    /// Arrancar el decoder sobre el dispositivo indicado. Devuelve el handle
    /// inmediatamente; la señal de "adjunto al stream" llega por
    /// `on_attached`, los resultados por `on_decode`.
    fn start(
        &self,
        request: &DecoderRequest,
        callbacks: DecoderCallbacks,
    ) -> Result<DecoderHandle, String>;
}

/// Ownership exclusivo de la instancia corriendo del decoder externo.
/// `release()` es idempotente; `Drop` es el backstop que garantiza soltar la
/// cámara en cualquier teardown (incluido unmount abrupto del widget).
pub struct DecoderHandle {
    engine: &'static str,
    controls: Option<Box<dyn DecoderControls>>,
}

impl DecoderHandle {
    pub fn new(engine: &'static str, controls: Box<dyn DecoderControls>) -> Self {
        Self {
            engine,
            controls: Some(controls),
        }
    }

    pub fn engine(&self) -> &'static str {
        self.engine
    }

    pub fn is_released(&self) -> bool {
        self.controls.is_none()
    }

    /// Detener el decoder subyacente. La segunda llamada (y siguientes) no
    /// hace nada: el stop real ocurre una sola vez.
    pub fn release(&mut self) -> Result<(), ScanError> {
        match self.controls.take() {
            Some(controls) => controls.stop().map_err(ScanError::DecoderStop),
            None => Ok(()),
        }
    }
}

impl Drop for DecoderHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("⚠️ [DECODER] Error liberando {} en drop: {}", self.engine, e);
        }
    }
}
