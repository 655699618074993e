// ============================================================================
// SCAN VIEWMODEL - LÓGICA DE LA SESIÓN DE ESCANEO
// ============================================================================
// Orquesta enumeración de cámaras, selección y arranque del decoder.
// SIN DOM: el estado vive en ScanSession, los hooks lo llevan a la UI.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::decoder::{DecoderCallbacks, DecoderRequest, QrDecoder};
use crate::models::{select_preferred_device, ScanError};
use crate::services::VideoDeviceSource;
use crate::state::{ScanSession, ScanSnapshot};

pub struct ScanViewModel<D: VideoDeviceSource> {
    devices: D,
    decoder: Rc<dyn QrDecoder>,
    session: ScanSession,
    video_element_id: String,
    scan_interval_ms: u32,
    log_devices: bool,
}

impl<D: VideoDeviceSource> ScanViewModel<D> {
    pub fn new(
        devices: D,
        decoder: Rc<dyn QrDecoder>,
        session: ScanSession,
        config: &AppConfig,
    ) -> Self {
        Self {
            devices,
            decoder,
            session,
            video_element_id: config.video_element_id.clone(),
            scan_interval_ms: config.scan_interval_ms,
            log_devices: config.log_devices,
        }
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        self.session.snapshot()
    }

    /// Arrancar una sesión de escaneo completa. Si ya hay una activa es un
    /// no-op. El error devuelto ya quedó registrado en la sesión; el caller
    /// solo decide si además lo muestra.
    pub async fn start_scan(&self) -> Result<(), ScanError> {
        let epoch = match self.session.begin_request() {
            Some(epoch) => epoch,
            None => return Ok(()),
        };

        log::info!("📷 [SCAN] Iniciando sesión de escaneo ({})", self.decoder.name());

        // 1. Enumerar cámaras disponibles
        let devices = match self.devices.list_video_inputs().await {
            Ok(devices) => devices,
            Err(error) => return self.report_failure(epoch, error),
        };

        // La sesión pudo detenerse mientras esperábamos la enumeración
        if !self.session.is_current(epoch) {
            log::info!("🛑 [SCAN] Arranque #{} cancelado durante la enumeración", epoch);
            return Ok(());
        }

        if self.log_devices {
            for (index, device) in devices.iter().enumerate() {
                log::info!("📷 [SCAN] Cámara {}: {} ({})", index, device.label, device.id);
            }
        }

        // 2. Elegir cámara trasera si la hay, si no la primera
        let device = match select_preferred_device(&devices) {
            Some(device) => device.clone(),
            None => return self.report_failure(epoch, ScanError::NoDeviceFound),
        };
        self.session.select_device(epoch, device.clone());

        // 3. Arrancar el decoder con callbacks atados a esta época
        let request = DecoderRequest {
            device_id: device.id.clone(),
            video_element_id: self.video_element_id.clone(),
            scan_interval_ms: self.scan_interval_ms,
        };

        match self.decoder.start(&request, self.callbacks_for(epoch)) {
            Ok(handle) => {
                self.session.store_handle(epoch, handle);
                Ok(())
            }
            Err(message) => self.report_failure(epoch, ScanError::DecoderStart(message)),
        }
    }

    /// Detener la sesión activa (idempotente)
    pub fn stop_scan(&self) {
        self.session.stop();
    }

    /// Descartar resultado/error y volver a Idle
    pub fn reset(&self) {
        self.session.reset();
    }

    /// Registrar el fallo en la sesión. Si el arranque quedó viejo el error
    /// se descarta: nadie debe verlo.
    fn report_failure(&self, epoch: u64, error: ScanError) -> Result<(), ScanError> {
        if self.session.fail(epoch, error.clone()) {
            Err(error)
        } else {
            Ok(())
        }
    }

    /// Los tres callbacks que recibe el decoder. Cada uno captura la época
    /// del arranque: si la sesión avanzó, son no-ops.
    fn callbacks_for(&self, epoch: u64) -> DecoderCallbacks {
        let on_attached = {
            let session = self.session.clone();
            Box::new(move || {
                session.mark_scanning(epoch);
            }) as Box<dyn Fn()>
        };

        let on_decode = {
            let session = self.session.clone();
            Box::new(move |text: String| {
                session.complete_decode(epoch, text);
            }) as Box<dyn Fn(String)>
        };

        let on_error = {
            let session = self.session.clone();
            Box::new(move |message: String| {
                session.fail(epoch, ScanError::DecoderStart(message));
            }) as Box<dyn Fn(String)>
        };

        DecoderCallbacks {
            on_attached,
            on_decode,
            on_error,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::decoder::mock::MockDecoder;
    use crate::models::{CameraDevice, ScanPhase};
    use crate::services::MockDeviceSource;

    fn test_config() -> AppConfig {
        AppConfig {
            default_engine: "zxing".to_string(),
            scan_interval_ms: 100,
            video_element_id: "qr-scanner-video".to_string(),
            log_devices: false,
            auto_start: true,
        }
    }

    fn two_cameras() -> Vec<CameraDevice> {
        vec![
            CameraDevice::new("dev-front", "Front Camera"),
            CameraDevice::new("dev-back", "Back Camera"),
        ]
    }

    fn viewmodel_with(
        devices: MockDeviceSource,
        decoder: MockDecoder,
    ) -> ScanViewModel<MockDeviceSource> {
        ScanViewModel::new(
            devices,
            Rc::new(decoder),
            ScanSession::new(),
            &test_config(),
        )
    }

    #[tokio::test]
    async fn arranque_feliz_hasta_decoded() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();

        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Requesting);
        assert_eq!(
            snap.selected_device.as_ref().map(|d| d.id.as_str()),
            Some("dev-back")
        );

        let request = espia.last_request().unwrap();
        assert_eq!(request.device_id, "dev-back");
        assert_eq!(request.video_element_id, "qr-scanner-video");
        assert_eq!(request.scan_interval_ms, 100);

        espia.fire_attached();
        assert_eq!(vm.snapshot().phase, ScanPhase::Scanning);

        espia.fire_decode("https://example.com");
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Decoded);
        assert_eq!(snap.last_result.as_deref(), Some("https://example.com"));
        assert_eq!(espia.stops.get(), 1);
    }

    #[tokio::test]
    async fn sin_camaras_reporta_no_device_found() {
        let vm = viewmodel_with(MockDeviceSource::with_devices(vec![]), MockDecoder::new());

        let error = vm.start_scan().await.unwrap_err();
        assert_eq!(error, ScanError::NoDeviceFound);

        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Idle);
        assert_eq!(snap.user_error.as_deref(), Some("No camera found."));
    }

    #[tokio::test]
    async fn enumeracion_fallida_reporta_el_motivo() {
        let vm = viewmodel_with(MockDeviceSource::failing("Permission denied"), MockDecoder::new());

        let error = vm.start_scan().await.unwrap_err();
        assert_eq!(error, ScanError::DeviceEnumeration("Permission denied".to_string()));
        assert_eq!(
            vm.snapshot().user_error.as_deref(),
            Some("Camera access failed: Permission denied")
        );
        assert_eq!(vm.snapshot().phase, ScanPhase::Idle);
    }

    #[tokio::test]
    async fn decoder_que_no_arranca_vuelve_a_idle() {
        let decoder = MockDecoder::failing_start("camera busy");
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        let error = vm.start_scan().await.unwrap_err();
        assert_eq!(error, ScanError::DecoderStart("camera busy".to_string()));
        assert_eq!(vm.snapshot().phase, ScanPhase::Idle);
    }

    #[tokio::test]
    async fn start_con_sesion_activa_es_noop() {
        let devices = MockDeviceSource::with_devices(two_cameras());
        let calls = devices.calls.clone();
        let vm = viewmodel_with(devices, MockDecoder::new());

        vm.start_scan().await.unwrap();
        assert_eq!(calls.get(), 1);

        // Sigue en Requesting: el segundo start no toca nada
        vm.start_scan().await.unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(vm.snapshot().phase, ScanPhase::Requesting);
    }

    #[tokio::test]
    async fn decode_tardio_tras_stop_no_hace_nada() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();
        espia.fire_attached();
        vm.stop_scan();
        assert_eq!(espia.stops.get(), 1);

        // El callback quedó vivo pero su época ya no es la vigente
        espia.fire_decode("late result");
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Idle);
        assert!(snap.last_result.is_none());
        assert_eq!(espia.stops.get(), 1);
    }

    #[tokio::test]
    async fn attach_tardio_tras_stop_se_ignora() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();
        vm.stop_scan();
        assert_eq!(espia.stops.get(), 1);

        // La cámara terminó de abrir después del stop: no revive la sesión
        espia.fire_attached();
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Idle);
        assert!(snap.user_error.is_none());
        assert_eq!(espia.starts.get(), 1);
    }

    #[tokio::test]
    async fn error_tardio_tras_decode_no_cambia_nada() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();
        espia.fire_attached();
        espia.fire_decode("winner");

        espia.fire_error("stream died");
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Decoded);
        assert_eq!(snap.last_result.as_deref(), Some("winner"));
        assert!(snap.user_error.is_none());
    }

    #[tokio::test]
    async fn error_del_stream_durante_scanning_vuelve_a_idle() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();
        espia.fire_attached();

        espia.fire_error("NotReadableError");
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Idle);
        assert_eq!(
            snap.user_error.as_deref(),
            Some("Camera access failed: NotReadableError")
        );
        assert_eq!(espia.stops.get(), 1);
    }

    #[tokio::test]
    async fn fallo_al_detener_no_se_muestra_al_usuario() {
        let decoder = MockDecoder::new();
        decoder.fail_stop.set(true);
        let espia = decoder.clone();
        let vm = viewmodel_with(MockDeviceSource::with_devices(two_cameras()), decoder);

        vm.start_scan().await.unwrap();
        espia.fire_attached();
        vm.stop_scan();

        // El stop subyacente falló pero la sesión igual vuelve a Idle sin
        // error visible
        assert_eq!(espia.stops.get(), 1);
        let snap = vm.snapshot();
        assert_eq!(snap.phase, ScanPhase::Idle);
        assert!(snap.user_error.is_none());
    }

    #[tokio::test]
    async fn reset_permite_un_nuevo_arranque() {
        let decoder = MockDecoder::new();
        let espia = decoder.clone();
        let devices = MockDeviceSource::with_devices(two_cameras());
        let calls = devices.calls.clone();
        let vm = viewmodel_with(devices, decoder);

        vm.start_scan().await.unwrap();
        vm.stop_scan();
        vm.reset();

        vm.start_scan().await.unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(espia.starts.get(), 2);
        assert_eq!(vm.snapshot().phase, ScanPhase::Requesting);
    }
}
