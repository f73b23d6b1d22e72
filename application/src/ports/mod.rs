//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ai_estimator;
pub mod progress;
pub mod summary_logger;
pub mod vote_store;
