pub mod device;
pub mod scan;

pub use device::{select_preferred_device, CameraDevice};
pub use scan::{ScanError, ScanPhase};
