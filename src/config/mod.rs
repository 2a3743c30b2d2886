pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, FilterConfig, LoggingConfig};
pub use loader::load_config;
