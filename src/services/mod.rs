// Servicios de plataforma

pub mod media_devices;

pub use media_devices::{MediaDeviceService, VideoDeviceSource};

#[cfg(test)]
pub use media_devices::MockDeviceSource;
