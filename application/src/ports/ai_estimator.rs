//! AI estimator port
//!
//! Defines the interface for asking an external service to estimate an item.

use async_trait::async_trait;
use gurubu_domain::{AiEstimate, PointScale};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while requesting an AI estimate
#[derive(Error, Debug)]
pub enum AiEstimatorError {
    #[error("AI estimation is disabled")]
    Disabled,

    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AiEstimatorError {
    /// Whether the service never produced an answer (as opposed to a bad one)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            AiEstimatorError::Disabled | AiEstimatorError::Timeout | AiEstimatorError::Connection(_)
        )
    }

    /// Fold the error into an estimate carrying the matching failure status
    pub fn into_estimate(self) -> AiEstimate {
        if self.is_unavailable() {
            AiEstimate::unavailable(self.to_string())
        } else {
            AiEstimate::error(self.to_string())
        }
    }
}

/// The item being estimated, as sent to the AI service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// Issue key, e.g. "PROJ-123"
    pub item_key: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scale: PointScale,
}

impl EstimationRequest {
    pub fn new(item_key: impl Into<String>, scale: PointScale) -> Self {
        Self {
            item_key: item_key.into(),
            title: String::new(),
            description: String::new(),
            scale,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Gateway to an AI estimation service
///
/// Retry and backoff belong to the implementation. The use case only bounds
/// the total wait with a timeout.
#[async_trait]
pub trait AiEstimator: Send + Sync {
    async fn estimate(&self, request: &EstimationRequest) -> Result<AiEstimate, AiEstimatorError>;
}

/// Estimator used when AI estimation is turned off
pub struct DisabledAiEstimator;

#[async_trait]
impl AiEstimator for DisabledAiEstimator {
    async fn estimate(&self, _request: &EstimationRequest) -> Result<AiEstimate, AiEstimatorError> {
        Err(AiEstimatorError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gurubu_domain::AiEstimateStatus;

    #[test]
    fn test_unavailable_errors_map_to_unavailable_status() {
        for error in [
            AiEstimatorError::Disabled,
            AiEstimatorError::Timeout,
            AiEstimatorError::Connection("refused".to_string()),
        ] {
            assert_eq!(error.into_estimate().status, AiEstimateStatus::Unavailable);
        }
    }

    #[test]
    fn test_bad_answers_map_to_error_status() {
        let estimate = AiEstimatorError::Http { status: 502 }.into_estimate();
        assert_eq!(estimate.status, AiEstimateStatus::Error);
        assert_eq!(estimate.reasoning, "HTTP error: 502");

        let estimate = AiEstimatorError::InvalidResponse("missing estimation".into()).into_estimate();
        assert_eq!(estimate.status, AiEstimateStatus::Error);
    }

    #[tokio::test]
    async fn test_disabled_estimator() {
        let request = EstimationRequest::new("PROJ-1", PointScale::fibonacci());
        let result = DisabledAiEstimator.estimate(&request).await;
        assert!(matches!(result, Err(AiEstimatorError::Disabled)));
    }
}
