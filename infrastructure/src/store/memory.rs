//! In-memory vote store.

use async_trait::async_trait;
use gurubu_application::ports::vote_store::{VoteStore, VoteStoreError};
use gurubu_domain::{Label, ParticipantId, RoomId, Votes};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Vote store keeping every room in process memory.
///
/// Rooms are created on the first `cast` or `insert_room`. Concurrent casts
/// by the same participant resolve last-write-wins.
#[derive(Default)]
pub struct InMemoryVoteStore {
    rooms: RwLock<HashMap<RoomId, Votes>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a room with an existing set of votes, replacing what was there
    pub async fn insert_room(&self, room: RoomId, votes: Votes) {
        self.rooms.write().await.insert(room, votes);
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn votes(&self, room: &RoomId) -> Result<Votes, VoteStoreError> {
        self.rooms
            .read()
            .await
            .get(room)
            .cloned()
            .ok_or_else(|| VoteStoreError::RoomNotFound(room.clone()))
    }

    async fn cast(
        &self,
        room: &RoomId,
        participant: ParticipantId,
        label: Label,
    ) -> Result<(), VoteStoreError> {
        debug!("{} voted {} in room {}", participant, label, room);
        self.rooms
            .write()
            .await
            .entry(room.clone())
            .or_default()
            .cast(participant, label);
        Ok(())
    }

    async fn join(&self, room: &RoomId, participant: ParticipantId) -> Result<(), VoteStoreError> {
        self.rooms
            .write()
            .await
            .entry(room.clone())
            .or_default()
            .join(participant);
        Ok(())
    }

    async fn retract(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
    ) -> Result<(), VoteStoreError> {
        let mut rooms = self.rooms.write().await;
        let votes = rooms
            .get_mut(room)
            .ok_or_else(|| VoteStoreError::RoomNotFound(room.clone()))?;
        votes.retract(participant.as_str());
        Ok(())
    }

    async fn clear(&self, room: &RoomId) -> Result<(), VoteStoreError> {
        let mut rooms = self.rooms.write().await;
        let votes = rooms
            .get_mut(room)
            .ok_or_else(|| VoteStoreError::RoomNotFound(room.clone()))?;
        votes.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cast_creates_room_and_overwrites() {
        let store = InMemoryVoteStore::new();
        let room = RoomId::new("r1");

        store.cast(&room, "alice".into(), "3".into()).await.unwrap();
        store.cast(&room, "alice".into(), "8".into()).await.unwrap();

        let votes = store.votes(&room).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes.get("alice"), Some(&Label::new("8")));
    }

    #[tokio::test]
    async fn test_unknown_room() {
        let store = InMemoryVoteStore::new();
        let room = RoomId::new("nope");
        assert!(matches!(
            store.votes(&room).await,
            Err(VoteStoreError::RoomNotFound(_))
        ));
        assert!(store.clear(&room).await.is_err());
        assert!(store.retract(&room, &"alice".into()).await.is_err());
    }

    #[tokio::test]
    async fn test_join_retract_clear() {
        let store = InMemoryVoteStore::new();
        let room = RoomId::new("r1");

        store.join(&room, "bob".into()).await.unwrap();
        store.cast(&room, "alice".into(), "5".into()).await.unwrap();
        assert_eq!(store.votes(&room).await.unwrap().cast_count(), 1);

        store.retract(&room, &"alice".into()).await.unwrap();
        assert_eq!(store.votes(&room).await.unwrap().cast_count(), 0);

        store.cast(&room, "bob".into(), "2".into()).await.unwrap();
        store.clear(&room).await.unwrap();
        let votes = store.votes(&room).await.unwrap();
        assert_eq!(votes.cast_count(), 0);
        assert_eq!(votes.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_casts_keep_one_vote_per_participant() {
        let store = Arc::new(InMemoryVoteStore::new());
        let room = RoomId::new("r1");

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            let room = room.clone();
            handles.push(tokio::spawn(async move {
                let participant = format!("p{}", i % 5);
                let label = if i % 2 == 0 { "3" } else { "5" };
                store
                    .cast(&room, ParticipantId::new(participant), label.into())
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let votes = store.votes(&room).await.unwrap();
        assert_eq!(votes.len(), 5);
        assert_eq!(votes.cast_count(), 5);
    }
}
