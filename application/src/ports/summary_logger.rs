//! Port for structured round logging.
//!
//! Defines the [`SummaryLogger`] trait for recording what happened in a
//! round (tally, AI outcome, final summary) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the round
//! history in a machine-readable format (JSONL).

use gurubu_domain::RoomId;
use serde_json::Value;

/// A structured round event for logging.
pub struct SummaryEvent {
    /// Event type identifier (e.g., "votes_tallied", "round_reconciled").
    pub event_type: &'static str,
    /// Room the event happened in
    pub room: RoomId,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SummaryEvent {
    pub fn new(event_type: &'static str, room: RoomId, payload: Value) -> Self {
        Self {
            event_type,
            room,
            payload,
        }
    }
}

/// Port for logging round events to a structured log.
///
/// The `log` method is synchronous and non-fallible: a failing log must not
/// fail the round.
pub trait SummaryLogger: Send + Sync {
    fn log(&self, event: SummaryEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSummaryLogger;

impl SummaryLogger for NoSummaryLogger {
    fn log(&self, _event: SummaryEvent) {}
}
