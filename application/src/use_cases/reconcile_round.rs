//! Reconcile Round use case
//!
//! Orchestrates one reconciliation pass: collect votes, fetch the AI
//! estimate, tally, reconcile, publish.

use crate::config::EstimationParams;
use crate::ports::ai_estimator::{AiEstimator, AiEstimatorError, EstimationRequest};
use crate::ports::progress::{EstimationProgress, NoProgress};
use crate::ports::summary_logger::{NoSummaryLogger, SummaryEvent, SummaryLogger};
use crate::ports::vote_store::{VoteStore, VoteStoreError};
use gurubu_domain::{
    AiEstimate, DomainError, PointScale, ReconciliationSummary, RoomId, VoteTally, reconcile,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while reconciling a round
#[derive(Error, Debug)]
pub enum ReconcileRoundError {
    #[error(transparent)]
    InvalidScale(#[from] DomainError),

    #[error("Vote store error: {0}")]
    VoteStore(#[from] VoteStoreError),
}

/// Input for the ReconcileRound use case
#[derive(Debug, Clone)]
pub struct ReconcileRoundInput {
    pub room: RoomId,
    pub scale: PointScale,
    /// Item to ask the AI about; without one the AI is not consulted
    pub request: Option<EstimationRequest>,
}

impl ReconcileRoundInput {
    pub fn new(room: impl Into<RoomId>, scale: PointScale) -> Self {
        Self {
            room: room.into(),
            scale,
            request: None,
        }
    }

    pub fn with_request(mut self, request: EstimationRequest) -> Self {
        self.request = Some(request);
        self
    }
}

/// Use case for reconciling the votes of a room with an AI estimate
///
/// Both ports may be trait objects (`ReconcileRoundUseCase<dyn VoteStore, dyn AiEstimator>`)
/// when the adapters are chosen at runtime.
pub struct ReconcileRoundUseCase<S: VoteStore + ?Sized + 'static, A: AiEstimator + ?Sized + 'static> {
    store: Arc<S>,
    estimator: Arc<A>,
    params: EstimationParams,
    logger: Arc<dyn SummaryLogger>,
}

impl<S, A> ReconcileRoundUseCase<S, A>
where
    S: VoteStore + ?Sized + 'static,
    A: AiEstimator + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, estimator: Arc<A>) -> Self {
        Self {
            store,
            estimator,
            params: EstimationParams::default(),
            logger: Arc::new(NoSummaryLogger),
        }
    }

    pub fn with_params(mut self, params: EstimationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn SummaryLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: ReconcileRoundInput,
    ) -> Result<ReconciliationSummary, ReconcileRoundError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ReconcileRoundInput,
        progress: &dyn EstimationProgress,
    ) -> Result<ReconciliationSummary, ReconcileRoundError> {
        info!("Reconciling room {}", input.room);

        // Votes and AI estimate are independent; fetch them together
        let (votes, ai_estimate) = tokio::join!(
            self.store.votes(&input.room),
            self.fetch_ai_estimate(input.request.as_ref(), progress)
        );
        let votes = votes?;
        progress.on_votes_collected(votes.len(), votes.cast_count());

        let tally = VoteTally::compute(&input.scale, &votes);
        let ignored = votes.cast_count() - tally.total();
        if ignored > 0 {
            debug!(
                "{} vote(s) in room {} use labels outside the scale and were skipped",
                ignored, input.room
            );
        }

        self.logger.log(SummaryEvent::new(
            "votes_tallied",
            input.room.clone(),
            json!({
                "participants": votes.len(),
                "cast": votes.cast_count(),
                "counted": tally.total(),
                "tally": tally,
            }),
        ));

        if let Some(estimate) = &ai_estimate {
            self.logger.log(SummaryEvent::new(
                "ai_estimate_resolved",
                input.room.clone(),
                json!({
                    "status": estimate.status,
                    "estimation": estimate.estimation,
                    "confidence": estimate.confidence,
                }),
            ));
        }

        let summary = reconcile(&tally, &input.scale, ai_estimate)?;

        info!(
            "Room {}: majority {}, agreement {}",
            input.room,
            summary
                .human_majority
                .as_ref()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            summary.agreement
        );

        self.logger.log(SummaryEvent::new(
            "round_reconciled",
            input.room.clone(),
            serde_json::to_value(&summary).unwrap_or_default(),
        ));

        progress.on_reconciled(&summary);
        Ok(summary)
    }

    /// Clear every vote of a room, e.g. when the administrator moves on
    pub async fn advance(&self, room: &RoomId) -> Result<(), ReconcileRoundError> {
        self.store.clear(room).await?;
        info!("Cleared votes in room {}", room);
        self.logger
            .log(SummaryEvent::new("round_cleared", room.clone(), json!({})));
        Ok(())
    }

    /// Resolve the AI estimate, folding every failure into a status
    async fn fetch_ai_estimate(
        &self,
        request: Option<&EstimationRequest>,
        progress: &dyn EstimationProgress,
    ) -> Option<AiEstimate> {
        if !self.params.ai_enabled {
            debug!("AI estimation disabled");
            return None;
        }
        let request = request?;

        progress.on_ai_request_start();
        let call = self.estimator.estimate(request);
        let result = match self.params.ai_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(AiEstimatorError::Timeout)),
            None => call.await,
        };

        let estimate = match result {
            Ok(estimate) => {
                info!(
                    "AI estimate for {}: {} (confidence {:.2})",
                    request.item_key, estimate.estimation, estimate.confidence
                );
                estimate
            }
            Err(e) => {
                warn!("AI estimate for {} failed: {}", request.item_key, e);
                e.into_estimate()
            }
        };

        progress.on_ai_request_complete(estimate.status);
        Some(estimate)
    }
}
