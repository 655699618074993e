// Utils compartidos

pub mod constants;
pub mod html5_qrcode_ffi;
pub mod js_interop;
pub mod zxing_ffi;

pub use constants::*;
pub use js_interop::*;
