// ============================================================================
// DECODER - Motores de decodificación QR disponibles y su factory.
// ============================================================================

use std::fmt;
use std::rc::Rc;

pub mod html5_qrcode;
pub mod traits;
pub mod zxing;

#[cfg(test)]
pub mod mock;

pub use html5_qrcode::Html5QrcodeDecoder;
pub use traits::{DecoderCallbacks, DecoderControls, DecoderHandle, DecoderRequest, QrDecoder};
pub use zxing::ZxingDecoder;

/// Motor de decodificación configurado
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecoderEngine {
    #[default]
    Zxing,
    Html5Qrcode,
}

impl DecoderEngine {
    /// Parsear el valor de configuración. Devuelve None si no se reconoce
    /// (el caller cae al motor por defecto).
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "zxing" => Some(Self::Zxing),
            "html5-qrcode" | "html5" => Some(Self::Html5Qrcode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zxing => "zxing",
            Self::Html5Qrcode => "html5-qrcode",
        }
    }
}

impl fmt::Display for DecoderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Instanciar el decoder del motor indicado
pub fn create_decoder(engine: DecoderEngine) -> Rc<dyn QrDecoder> {
    match engine {
        DecoderEngine::Zxing => Rc::new(ZxingDecoder::new()),
        DecoderEngine::Html5Qrcode => Rc::new(Html5QrcodeDecoder::new()),
    }
}
