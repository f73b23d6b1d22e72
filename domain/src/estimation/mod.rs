//! Estimation aggregation
//!
//! Turns the votes of a planning poker round into an advisory summary.
//!
//! # Flow
//!
//! ```text
//! Votes ──► VoteTally::compute ──► VoteTally ──┐
//!                                              ├─► reconcile ──► ReconciliationSummary
//!                          Option<AiEstimate> ─┘
//! ```
//!
//! Both steps are pure functions over already-resolved inputs. Fetching votes
//! and the AI estimate is the caller's business (see the application layer).

pub mod ai_estimate;
pub mod label;
pub mod reconcile;
pub mod scale;
pub mod statistics;
pub mod tally;
pub mod vote;

pub use ai_estimate::{AiEstimate, AiEstimateStatus};
pub use label::{EstimateValue, Label, labels_equal};
pub use reconcile::{ReconciliationSummary, reconcile};
pub use scale::PointScale;
pub use statistics::VoteStatistics;
pub use tally::{VoteTally, tally};
pub use vote::{ParticipantId, RoomId, Votes};
