//! Estimator returning an operator-supplied estimate.

use async_trait::async_trait;
use gurubu_application::{AiEstimator, AiEstimatorError, EstimationRequest};
use gurubu_domain::AiEstimate;

/// Answers every request with the same estimate.
///
/// Used offline, when the estimate was obtained out of band and only needs
/// to be reconciled with the votes.
pub struct StaticAiEstimator {
    estimate: AiEstimate,
}

impl StaticAiEstimator {
    pub fn new(estimate: AiEstimate) -> Self {
        Self { estimate }
    }
}

#[async_trait]
impl AiEstimator for StaticAiEstimator {
    async fn estimate(&self, _request: &EstimationRequest) -> Result<AiEstimate, AiEstimatorError> {
        Ok(self.estimate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gurubu_domain::PointScale;

    #[tokio::test]
    async fn test_returns_configured_estimate() {
        let estimator = StaticAiEstimator::new(AiEstimate::new("8").with_confidence(0.5));
        let request = EstimationRequest::new("PROJ-2", PointScale::fibonacci());
        let estimate = estimator.estimate(&request).await.unwrap();
        assert_eq!(estimate.estimation.normalized(), "8");
        assert_eq!(estimate.confidence, 0.5);
    }
}
