// ============================================================================
// QR SCANNER WIDGET - MVVM (RUST PURO + YEW)
// ============================================================================
// Arquitectura:
// - Components: render Yew (sin lógica)
// - Hooks: unen la sesión con el ciclo de vida de los componentes
// - ViewModels: orquestación (enumerar, seleccionar, arrancar decoder)
// - State: máquina de estados de la sesión con Rc<RefCell>
// - Services: acceso a la API MediaDevices del navegador
// - Decoder: librerías JS de decodificación tras un trait común
// - Models: tipos del dominio (dispositivos, fases, errores)
// ============================================================================

pub mod components;
pub mod config;
pub mod decoder;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

pub use components::{App, Scanner};
pub use config::{AppConfig, CONFIG};
pub use decoder::DecoderEngine;
pub use models::{CameraDevice, ScanError, ScanPhase};
pub use state::{ScanSession, ScanSnapshot};
