//! Infrastructure layer for gurubu
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod ai;
pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
#[cfg(feature = "ai-service")]
pub use ai::HttpAiEstimator;
pub use ai::StaticAiEstimator;
pub use config::{
    ConfigLoader, ConfigValidationError, FileAiConfig, FileConfig, FileEstimationConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat,
};
pub use logging::JsonlSummaryLogger;
pub use store::{InMemoryVoteStore, JsonFileVoteStore};
