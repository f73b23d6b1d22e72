//! AI-suggested estimate value object

use super::label::{EstimateValue, Label};
use serde::{Deserialize, Serialize};

/// How the AI estimation request was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiEstimateStatus {
    /// The service answered with a usable estimate
    #[default]
    Ok,
    /// The service could not be reached, timed out, or is disabled
    Unavailable,
    /// The service answered but the answer could not be used
    Error,
}

impl AiEstimateStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, AiEstimateStatus::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiEstimateStatus::Ok => "ok",
            AiEstimateStatus::Unavailable => "unavailable",
            AiEstimateStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AiEstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimate suggested by an external AI service
///
/// # Example
///
/// ```
/// use gurubu_domain::estimation::{AiEstimate, AiEstimateStatus};
///
/// let estimate = AiEstimate::new(5.0).with_confidence(1.4);
/// assert_eq!(estimate.confidence, 1.0);
/// assert!(estimate.is_usable());
///
/// let failed = AiEstimate::unavailable("timed out");
/// assert_eq!(failed.status, AiEstimateStatus::Unavailable);
/// assert!(!failed.is_usable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiEstimate {
    /// Suggested value, number or label text
    pub estimation: EstimateValue,
    /// Confidence between 0.0 and 1.0
    pub confidence: f64,
    /// Free-text explanation
    #[serde(default)]
    pub reasoning: String,
    /// Free-text comparison with similar past items
    #[serde(default)]
    pub historical_comparison: String,
    /// Whether the service suggests splitting the item
    #[serde(default)]
    pub split_recommendation: bool,
    #[serde(default)]
    pub status: AiEstimateStatus,
}

impl AiEstimate {
    /// A successful estimate with zero confidence and no commentary
    pub fn new(estimation: impl Into<EstimateValue>) -> Self {
        Self {
            estimation: estimation.into(),
            confidence: 0.0,
            reasoning: String::new(),
            historical_comparison: String::new(),
            split_recommendation: false,
            status: AiEstimateStatus::Ok,
        }
    }

    /// Placeholder for a request that never produced an answer
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::failed(AiEstimateStatus::Unavailable, reason)
    }

    /// Placeholder for an answer that could not be used
    pub fn error(reason: impl Into<String>) -> Self {
        Self::failed(AiEstimateStatus::Error, reason)
    }

    fn failed(status: AiEstimateStatus, reason: impl Into<String>) -> Self {
        Self {
            reasoning: reason.into(),
            status,
            ..Self::new(EstimateValue::default())
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_historical_comparison(mut self, comparison: impl Into<String>) -> Self {
        self.historical_comparison = comparison.into();
        self
    }

    pub fn with_split_recommendation(mut self, split: bool) -> Self {
        self.split_recommendation = split;
        self
    }

    /// Only estimates with status `ok` may be shown as a suggestion
    pub fn is_usable(&self) -> bool {
        self.status.is_ok()
    }

    /// The suggested value as a label
    pub fn label(&self) -> Label {
        self.estimation.to_label()
    }
}
