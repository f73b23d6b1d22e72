//! Configuration file loading for gurubu
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GURUBU_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./gurubu.toml` or `./.gurubu.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/gurubu/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAiConfig, FileConfig, FileEstimationConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
