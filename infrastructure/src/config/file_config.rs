//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [estimation]
//! scale = ["1", "2", "3", "5", "8", "13", "?"]
//! room = "team-a"
//!
//! [ai]
//! enabled = true
//! endpoint = "http://localhost:5000/ai/estimate"
//! timeout_seconds = 10
//! api_key_env = "GURUBU_AI_KEY"
//!
//! [output]
//! format = "full"
//! color = true
//!
//! [logging]
//! summary_log = "~/.local/share/gurubu/rounds.jsonl"
//! ```

use gurubu_application::EstimationParams;
use gurubu_domain::{DomainError, OutputFormat, PointScale};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use gurubu_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("ai.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("ai.endpoint is required when ai.enabled is true")]
    MissingAiEndpoint,

    #[error("estimation.scale: {0}")]
    InvalidScale(#[from] DomainError),
}

/// Raw estimation configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEstimationConfig {
    /// Point scale labels, in display order
    pub scale: Vec<String>,
    /// Room whose votes are reconciled
    pub room: String,
}

impl Default for FileEstimationConfig {
    fn default() -> Self {
        Self {
            scale: PointScale::fibonacci()
                .iter()
                .map(|l| l.to_string())
                .collect(),
            room: "default".to_string(),
        }
    }
}

/// Raw AI estimation service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAiConfig {
    /// Consult the AI estimation service
    pub enabled: bool,
    /// URL of the estimation endpoint
    pub endpoint: Option<String>,
    /// Timeout in seconds for the estimation request
    pub timeout_seconds: Option<u64>,
    /// Name of the environment variable holding the bearer token
    pub api_key_env: Option<String>,
}

impl Default for FileAiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_seconds: Some(10),
            api_key_env: None,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one record per round event
    pub summary_log: Option<String>,
    /// Directory for daily-rotated diagnostic log files
    pub trace_dir: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub estimation: FileEstimationConfig,
    pub ai: FileAiConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_without_scale()?;
        self.point_scale()?;
        Ok(())
    }

    /// Validate everything but `[estimation] scale`, for when the scale
    /// comes from somewhere else
    pub fn validate_without_scale(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.ai.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let endpoint_missing = self
            .ai
            .endpoint
            .as_deref()
            .is_none_or(|e| e.trim().is_empty());
        if self.ai.enabled && endpoint_missing {
            return Err(ConfigValidationError::MissingAiEndpoint);
        }

        Ok(())
    }

    /// The configured point scale
    pub fn point_scale(&self) -> Result<PointScale, DomainError> {
        PointScale::new(self.estimation.scale.iter().map(String::as_str))
    }

    /// Use case parameters derived from the `[ai]` section
    pub fn estimation_params(&self) -> EstimationParams {
        EstimationParams::default()
            .with_ai_enabled(self.ai.enabled)
            .with_ai_timeout_seconds(self.ai.timeout_seconds)
    }
}
