// ViewModels - lógica de negocio sin DOM

pub mod scan_viewmodel;

pub use scan_viewmodel::ScanViewModel;
