// Estado compartido del widget

pub mod scan_session;

pub use scan_session::{ScanSession, ScanSnapshot};
