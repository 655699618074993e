// ============================================================================
// SCAN MODELS - Fase de la sesión de escaneo y errores del dominio
// ============================================================================

use std::fmt;

/// Fase de una sesión de escaneo. Solo `Idle` y `Decoded` aceptan un nuevo
/// start; `Requesting` y `Scanning` son estados activos/transitorios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanPhase {
    /// Sin sesión activa (estado inicial y tras stop/error)
    Idle,
    /// Enumerando cámaras / esperando que el decoder se adjunte al stream
    Requesting,
    /// Decoder adjunto, analizando frames
    Scanning,
    /// Primer decode exitoso registrado; stream liberado
    Decoded,
}

impl ScanPhase {
    /// Hay una sesión activa (con recursos de cámara en juego)
    pub fn is_active(&self) -> bool {
        matches!(self, ScanPhase::Requesting | ScanPhase::Scanning)
    }

    /// Se puede iniciar una nueva sesión desde esta fase
    pub fn can_start(&self) -> bool {
        matches!(self, ScanPhase::Idle | ScanPhase::Decoded)
    }
}

/// Errores de la sesión de escaneo. Todos son terminales para el intento
/// actual: no hay reintentos automáticos (reintentar con permiso denegado
/// re-promptea al usuario en cada intento).
#[derive(Clone, Debug, PartialEq)]
pub enum ScanError {
    /// La plataforma denegó el permiso de cámara o no tiene media devices
    DeviceEnumeration(String),
    /// La enumeración funcionó pero no hay cámaras
    NoDeviceFound,
    /// El decoder externo no pudo adjuntarse a la cámara (ej: ocupada)
    DecoderStart(String),
    /// Fallo liberando el decoder - solo se loguea, nunca se muestra
    DecoderStop(String),
}

impl ScanError {
    /// Mensaje para mostrar al usuario (alert). `DecoderStop` devuelve
    /// `None`: la UI no puede hacer nada con él y no debe bloquear el reset.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ScanError::DeviceEnumeration(msg) => Some(format!("Camera access failed: {}", msg)),
            ScanError::NoDeviceFound => Some("No camera found.".to_string()),
            ScanError::DecoderStart(msg) => Some(format!("Camera access failed: {}", msg)),
            ScanError::DecoderStop(_) => None,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::DeviceEnumeration(msg) => write!(f, "Device enumeration failed: {}", msg),
            ScanError::NoDeviceFound => write!(f, "No video input devices found"),
            ScanError::DecoderStart(msg) => write!(f, "Decoder failed to start: {}", msg),
            ScanError::DecoderStop(msg) => write!(f, "Decoder failed to stop: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fases_activas_rechazan_start() {
        assert!(ScanPhase::Idle.can_start());
        assert!(ScanPhase::Decoded.can_start());
        assert!(!ScanPhase::Requesting.can_start());
        assert!(!ScanPhase::Scanning.can_start());

        assert!(ScanPhase::Requesting.is_active());
        assert!(ScanPhase::Scanning.is_active());
        assert!(!ScanPhase::Idle.is_active());
        assert!(!ScanPhase::Decoded.is_active());
    }

    #[test]
    fn mensajes_de_usuario() {
        assert_eq!(
            ScanError::NoDeviceFound.user_message().as_deref(),
            Some("No camera found.")
        );
        assert_eq!(
            ScanError::DeviceEnumeration("NotAllowedError".into())
                .user_message()
                .as_deref(),
            Some("Camera access failed: NotAllowedError")
        );
        // DecoderStop nunca se muestra al usuario
        assert!(ScanError::DecoderStop("busy".into()).user_message().is_none());
    }
}
