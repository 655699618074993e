// ============================================================================
// CAMERA DEVICE - Dispositivo de video disponible en el navegador
// ============================================================================

use serde::{Deserialize, Serialize};

/// Palabras clave que identifican una cámara trasera en el label del
/// dispositivo ("Back Camera", "camera2 0, facing environment", etc.)
const REAR_FACING_KEYWORDS: [&str; 2] = ["back", "environment"];

/// Cámara reportada por `navigator.mediaDevices`. El id es opaco (lo asigna
/// el navegador y cambia entre permisos/orígenes); el label es legible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
}

impl CameraDevice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Verificar si el label sugiere cámara trasera
    pub fn is_rear_facing(&self) -> bool {
        let label = self.label.to_lowercase();
        REAR_FACING_KEYWORDS
            .iter()
            .any(|keyword| label.contains(keyword))
    }
}

/// Seleccionar la cámara preferida de forma determinista: la primera cuyo
/// label sugiera cámara trasera; si no hay ninguna, la primera de la lista.
/// Lista vacía => `None` (el caller reporta "No camera found.").
pub fn select_preferred_device(devices: &[CameraDevice]) -> Option<&CameraDevice> {
    devices
        .iter()
        .find(|device| device.is_rear_facing())
        .or_else(|| devices.first())
}
