//! Wire format of the AI estimation workflow service.
//!
//! The service is inconsistent about field casing and about whether the
//! estimate is a number or a string; [`WireEstimateResponse`] accepts every
//! variant seen and reshapes it into a domain [`AiEstimate`].

use gurubu_application::{AiEstimatorError, EstimationRequest};
use gurubu_domain::{AiEstimate, EstimateValue};
use serde::{Deserialize, Serialize};

/// Request body posted to the estimation endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEstimateRequest<'a> {
    pub issue_key: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub point_scale: Vec<&'a str>,
}

impl<'a> From<&'a EstimationRequest> for WireEstimateRequest<'a> {
    fn from(request: &'a EstimationRequest) -> Self {
        Self {
            issue_key: &request.item_key,
            title: &request.title,
            description: &request.description,
            point_scale: request.scale.iter().map(|l| l.as_str()).collect(),
        }
    }
}

/// Response body of the estimation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct WireEstimateResponse {
    #[serde(alias = "estimate")]
    pub estimation: Option<EstimateValue>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default, alias = "historicalComparison")]
    pub historical_comparison: Option<String>,
    #[serde(default, alias = "splitRecommendation")]
    pub split_recommendation: Option<bool>,
}

impl WireEstimateResponse {
    /// Reshape into a domain estimate; a response without an estimate is invalid
    pub fn into_estimate(self) -> Result<AiEstimate, AiEstimatorError> {
        let estimation = self
            .estimation
            .filter(|e| !e.normalized().is_empty())
            .ok_or_else(|| AiEstimatorError::InvalidResponse("missing estimation".to_string()))?;

        Ok(AiEstimate::new(estimation)
            .with_confidence(self.confidence.unwrap_or(0.0))
            .with_reasoning(self.reasoning.unwrap_or_default())
            .with_historical_comparison(self.historical_comparison.unwrap_or_default())
            .with_split_recommendation(self.split_recommendation.unwrap_or(false)))
    }
}

/// Parse and reshape a raw response body
pub fn parse_estimate_response(body: &str) -> Result<AiEstimate, AiEstimatorError> {
    let response: WireEstimateResponse = serde_json::from_str(body)
        .map_err(|e| AiEstimatorError::InvalidResponse(e.to_string()))?;
    response.into_estimate()
}
