pub mod use_scan_session;

pub use use_scan_session::{use_scan_session, UseScanSessionHandle};
