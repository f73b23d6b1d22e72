//! Vote store port
//!
//! Defines where the current votes of a room come from.

use async_trait::async_trait;
use gurubu_domain::{Label, ParticipantId, RoomId, Votes};
use thiserror::Error;

/// Errors that can occur while reading or writing votes
#[derive(Error, Debug)]
pub enum VoteStoreError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Could not parse votes: {0}")]
    Parse(String),
}

/// Source of truth for participant votes
///
/// Implementations must keep at most one current vote per participant:
/// a second `cast` by the same participant replaces the first.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Snapshot of every participant's current vote in a room
    async fn votes(&self, room: &RoomId) -> Result<Votes, VoteStoreError>;

    /// Record or replace a participant's vote
    async fn cast(
        &self,
        room: &RoomId,
        participant: ParticipantId,
        label: Label,
    ) -> Result<(), VoteStoreError>;

    /// Register a participant who has not voted yet (keeps an existing vote)
    async fn join(&self, room: &RoomId, participant: ParticipantId) -> Result<(), VoteStoreError>;

    /// Withdraw a participant's vote
    async fn retract(&self, room: &RoomId, participant: &ParticipantId)
    -> Result<(), VoteStoreError>;

    /// Clear all votes of a room (participants stay)
    async fn clear(&self, room: &RoomId) -> Result<(), VoteStoreError>;
}
