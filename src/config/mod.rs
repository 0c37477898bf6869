//! Configuration loading and validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoaderConfig, LoggingConfig, PreloadConfig};
