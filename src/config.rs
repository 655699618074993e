use serde::{Deserialize, Serialize};

use crate::decoder::DecoderEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Motor de decodificación ("zxing" o "html5-qrcode")
    pub default_engine: String,
    /// Intervalo entre frames analizados (ms)
    pub scan_interval_ms: u32,
    /// Id del elemento <video> del widget
    pub video_element_id: String,
    /// Listar por log cada cámara encontrada
    pub log_devices: bool,
    /// Arrancar el escaneo automáticamente al montar el widget
    pub auto_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_engine: "zxing".to_string(),
            scan_interval_ms: 100,
            video_element_id: "qr-scanner-video".to_string(),
            log_devices: true,
            auto_start: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            default_engine: option_env!("QR_DEFAULT_ENGINE")
                .unwrap_or("zxing").to_string(),
            scan_interval_ms: option_env!("QR_SCAN_INTERVAL_MS")
                .unwrap_or("100").parse().unwrap_or(100),
            video_element_id: option_env!("QR_VIDEO_ELEMENT_ID")
                .unwrap_or("qr-scanner-video").to_string(),
            log_devices: option_env!("QR_LOG_DEVICES")
                .unwrap_or("true").parse().unwrap_or(true),
            auto_start: option_env!("QR_AUTO_START")
                .unwrap_or("true").parse().unwrap_or(true),
        }
    }

    /// Motor configurado; valores desconocidos caen al motor por defecto
    pub fn decoder_engine(&self) -> DecoderEngine {
        DecoderEngine::from_config(&self.default_engine).unwrap_or_else(|| {
            log::warn!(
                "⚠️ [CONFIG] Motor desconocido '{}', usando {}",
                self.default_engine,
                DecoderEngine::default()
            );
            DecoderEngine::default()
        })
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_desconocido_cae_al_por_defecto() {
        let config = AppConfig {
            default_engine: "quagga".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.decoder_engine(), DecoderEngine::Zxing);
    }

    #[test]
    fn motor_html5_se_reconoce() {
        let config = AppConfig {
            default_engine: "html5-qrcode".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.decoder_engine(), DecoderEngine::Html5Qrcode);
    }
}
