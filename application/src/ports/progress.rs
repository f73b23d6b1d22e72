//! Progress notification port
//!
//! Defines the interface for reporting progress while a round is reconciled.

use gurubu_domain::{AiEstimateStatus, ReconciliationSummary};

/// Callback for progress updates during reconciliation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, web UI, etc.)
pub trait EstimationProgress: Send + Sync {
    /// Called once the vote snapshot has been read
    fn on_votes_collected(&self, participants: usize, cast: usize);

    /// Called before the AI estimate is requested
    fn on_ai_request_start(&self);

    /// Called when the AI request resolved, successfully or not
    fn on_ai_request_complete(&self, status: AiEstimateStatus);

    /// Called with the finished summary
    fn on_reconciled(&self, _summary: &ReconciliationSummary) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EstimationProgress for NoProgress {
    fn on_votes_collected(&self, _participants: usize, _cast: usize) {}
    fn on_ai_request_start(&self) {}
    fn on_ai_request_complete(&self, _status: AiEstimateStatus) {}
}
