//! Vote store backed by a JSON file.
//!
//! The file holds the votes of a single room:
//!
//! ```json
//! { "alice": "3", "bob": "5", "carol": null }
//! ```
//!
//! It is read once at open and written back after every change.

use async_trait::async_trait;
use gurubu_application::ports::vote_store::{VoteStore, VoteStoreError};
use gurubu_domain::{Label, ParticipantId, RoomId, Votes};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Single-room vote store persisted as a JSON object
pub struct JsonFileVoteStore {
    path: PathBuf,
    room: RoomId,
    votes: Mutex<Votes>,
}

impl JsonFileVoteStore {
    /// Open the file, or start empty if it does not exist yet
    pub async fn open(path: impl AsRef<Path>, room: RoomId) -> Result<Self, VoteStoreError> {
        let path = path.as_ref().to_path_buf();
        let votes = match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse_votes(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Votes file {} not found, starting empty", path.display());
                Votes::new()
            }
            Err(e) => return Err(VoteStoreError::Io(format!("{}: {}", path.display(), e))),
        };

        info!(
            "Loaded {} participant(s) from {}",
            votes.len(),
            path.display()
        );

        Ok(Self {
            path,
            room,
            votes: Mutex::new(votes),
        })
    }

    fn check_room(&self, room: &RoomId) -> Result<(), VoteStoreError> {
        if room == &self.room {
            Ok(())
        } else {
            Err(VoteStoreError::RoomNotFound(room.clone()))
        }
    }

    /// Apply `change` to a copy, write it out, and keep it only once saved
    async fn update(
        &self,
        room: &RoomId,
        change: impl FnOnce(&mut Votes),
    ) -> Result<(), VoteStoreError> {
        self.check_room(room)?;
        let mut votes = self.votes.lock().await;

        let mut next = votes.clone();
        change(&mut next);
        self.persist(&next).await?;

        *votes = next;
        Ok(())
    }

    async fn persist(&self, votes: &Votes) -> Result<(), VoteStoreError> {
        let json = serde_json::to_string_pretty(votes)
            .map_err(|e| VoteStoreError::Parse(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| VoteStoreError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

/// Parse a `{participant: label | null}` JSON object
pub fn parse_votes(content: &str) -> Result<Votes, VoteStoreError> {
    if content.trim().is_empty() {
        return Ok(Votes::new());
    }
    serde_json::from_str(content).map_err(|e| VoteStoreError::Parse(e.to_string()))
}

#[async_trait]
impl VoteStore for JsonFileVoteStore {
    async fn votes(&self, room: &RoomId) -> Result<Votes, VoteStoreError> {
        self.check_room(room)?;
        Ok(self.votes.lock().await.clone())
    }

    async fn cast(
        &self,
        room: &RoomId,
        participant: ParticipantId,
        label: Label,
    ) -> Result<(), VoteStoreError> {
        self.update(room, |votes| votes.cast(participant, label)).await
    }

    async fn join(&self, room: &RoomId, participant: ParticipantId) -> Result<(), VoteStoreError> {
        self.update(room, |votes| votes.join(participant)).await
    }

    async fn retract(
        &self,
        room: &RoomId,
        participant: &ParticipantId,
    ) -> Result<(), VoteStoreError> {
        self.update(room, |votes| votes.retract(participant.as_str()))
            .await
    }

    async fn clear(&self, room: &RoomId) -> Result<(), VoteStoreError> {
        self.update(room, Votes::clear).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_votes() {
        let votes = parse_votes(r#"{"alice": "3", "bob": null}"#).unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes.cast_count(), 1);

        assert!(parse_votes("").unwrap().is_empty());
        assert!(matches!(
            parse_votes("[1, 2]"),
            Err(VoteStoreError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileVoteStore::open(dir.path().join("votes.json"), RoomId::default())
            .await
            .unwrap();
        assert!(store.votes(&RoomId::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_changes_are_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.json");
        std::fs::write(&path, r#"{"alice": "3"}"#).unwrap();

        let room = RoomId::new("grooming");
        let store = JsonFileVoteStore::open(&path, room.clone()).await.unwrap();
        store.cast(&room, "bob".into(), "5".into()).await.unwrap();

        let reopened = JsonFileVoteStore::open(&path, room.clone()).await.unwrap();
        let votes = reopened.votes(&room).await.unwrap();
        assert_eq!(votes.cast_count(), 2);

        reopened.clear(&room).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let cleared = parse_votes(&content).unwrap();
        assert_eq!(cleared.len(), 2);
        assert_eq!(cleared.cast_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_votes() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join("votes.json");
        std::fs::write(&path, r#"{"bob": "3"}"#).unwrap();

        let room = RoomId::default();
        let store = JsonFileVoteStore::open(&path, room.clone()).await.unwrap();
        std::fs::remove_dir_all(&sub).unwrap();

        let result = store.cast(&room, "alice".into(), "5".into()).await;
        assert!(matches!(result, Err(VoteStoreError::Io(_))));
        assert!(matches!(
            store.clear(&room).await,
            Err(VoteStoreError::Io(_))
        ));

        let votes = store.votes(&room).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes.cast_count(), 1);
        assert!(votes.get("alice").is_none());
    }

    #[tokio::test]
    async fn test_other_room_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileVoteStore::open(dir.path().join("v.json"), RoomId::new("a"))
            .await
            .unwrap();
        assert!(matches!(
            store.votes(&RoomId::new("b")).await,
            Err(VoteStoreError::RoomNotFound(_))
        ));
    }
}
