//! Application layer for gurubu
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EstimationParams;
pub use ports::{
    ai_estimator::{AiEstimator, AiEstimatorError, DisabledAiEstimator, EstimationRequest},
    progress::{EstimationProgress, NoProgress},
    summary_logger::{NoSummaryLogger, SummaryEvent, SummaryLogger},
    vote_store::{VoteStore, VoteStoreError},
};
pub use use_cases::reconcile_round::{
    ReconcileRoundError, ReconcileRoundInput, ReconcileRoundUseCase,
};
