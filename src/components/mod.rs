pub mod app;
pub mod scanner;

pub use app::App;
pub use scanner::Scanner;
