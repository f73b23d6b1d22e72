//! Estimation parameters for use case behavior control.
//!
//! [`EstimationParams`] groups the static parameters that control
//! [`ReconcileRoundUseCase`](crate::use_cases::reconcile_round::ReconcileRoundUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reconciliation control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationParams {
    /// Whether the AI estimator is consulted at all.
    pub ai_enabled: bool,
    /// Upper bound on the wait for the AI estimate.
    pub ai_timeout: Option<Duration>,
}

impl Default for EstimationParams {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            ai_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl EstimationParams {
    // ==================== Builder Methods ====================

    pub fn with_ai_enabled(mut self, enabled: bool) -> Self {
        self.ai_enabled = enabled;
        self
    }

    pub fn with_ai_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Timeout given in whole seconds; `None` waits indefinitely.
    pub fn with_ai_timeout_seconds(self, seconds: Option<u64>) -> Self {
        self.with_ai_timeout(seconds.map(Duration::from_secs))
    }
}
