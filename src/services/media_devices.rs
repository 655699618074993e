// ============================================================================
// MEDIA DEVICES - Enumeración de cámaras vía navigator.mediaDevices.
//
// El controller es genérico sobre VideoDeviceSource para poder probarse en
// host con un mock; en el navegador la implementación real es
// MediaDeviceService.
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaDeviceInfo, MediaDeviceKind};

use crate::models::{CameraDevice, ScanError};
use crate::utils::describe_js_error;

/// Fuente de dispositivos de entrada de video
#[allow(async_fn_in_trait)]
pub trait VideoDeviceSource {
    /// Listar las cámaras disponibles, en el orden que reporta la plataforma.
    /// Lista vacía NO es error aquí; el caller decide qué hacer con ella.
    async fn list_video_inputs(&self) -> Result<Vec<CameraDevice>, ScanError>;
}

/// Implementación real sobre la API MediaDevices del navegador
#[derive(Clone, Default)]
pub struct MediaDeviceService;

impl MediaDeviceService {
    pub fn new() -> Self {
        Self
    }
}

impl VideoDeviceSource for MediaDeviceService {
    async fn list_video_inputs(&self) -> Result<Vec<CameraDevice>, ScanError> {
        let window = web_sys::window()
            .ok_or_else(|| ScanError::DeviceEnumeration("window no disponible".to_string()))?;

        let media_devices = window
            .navigator()
            .media_devices()
            .map_err(|e| ScanError::DeviceEnumeration(describe_js_error(&e)))?;

        let promise = media_devices
            .enumerate_devices()
            .map_err(|e| ScanError::DeviceEnumeration(describe_js_error(&e)))?;

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| ScanError::DeviceEnumeration(describe_js_error(&e)))?;

        let entries = js_sys::Array::from(&result);
        let mut devices = Vec::new();

        for entry in entries.iter() {
            let info: MediaDeviceInfo = match entry.dyn_into() {
                Ok(info) => info,
                Err(_) => continue,
            };
            if info.kind() == MediaDeviceKind::Videoinput {
                devices.push(CameraDevice::new(info.device_id(), info.label()));
            }
        }

        log::info!("📷 [DEVICES] {} cámara(s) encontradas", devices.len());
        Ok(devices)
    }
}

/// Fuente fija para tests del controller
#[cfg(test)]
#[derive(Clone)]
pub struct MockDeviceSource {
    devices: Vec<CameraDevice>,
    failure: Option<String>,
    pub calls: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MockDeviceSource {
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        Self {
            devices,
            failure: None,
            calls: std::rc::Rc::new(std::cell::Cell::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            devices: Vec::new(),
            failure: Some(message.to_string()),
            calls: std::rc::Rc::new(std::cell::Cell::new(0)),
        }
    }
}

#[cfg(test)]
impl VideoDeviceSource for MockDeviceSource {
    async fn list_video_inputs(&self) -> Result<Vec<CameraDevice>, ScanError> {
        self.calls.set(self.calls.get() + 1);
        match &self.failure {
            Some(message) => Err(ScanError::DeviceEnumeration(message.clone())),
            None => Ok(self.devices.clone()),
        }
    }
}
