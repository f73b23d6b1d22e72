//! Domain layer for gurubu
//!
//! This crate contains the estimation entities, value objects and the two
//! pure operations of the estimation engine. It has no dependencies on
//! infrastructure or presentation concerns, performs no I/O and holds no
//! shared state.
//!
//! # Core Concepts
//!
//! ## Tally
//!
//! A [`VoteTally`] counts the current votes of a round per label of its
//! [`PointScale`]. Votes for labels the scale does not know are skipped.
//!
//! ## Reconciliation
//!
//! [`reconcile`] combines the tally with an optional [`AiEstimate`] into a
//! [`ReconciliationSummary`]: the human majority, the AI suggestion (only if
//! it resolved successfully) and whether the two agree.

pub mod config;
pub mod core;
pub mod estimation;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use estimation::{
    AiEstimate, AiEstimateStatus, EstimateValue, Label, ParticipantId, PointScale,
    ReconciliationSummary, RoomId, VoteStatistics, VoteTally, Votes, labels_equal, reconcile,
    tally,
};
