//! Participant votes for a single estimation round

use super::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a room member who may cast a vote
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a grooming room
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new("default")
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Current vote of every participant in a round
///
/// Each participant holds at most one vote. Casting again replaces the
/// previous vote; it never adds a second one. `None` means the participant
/// is present but has not voted.
///
/// # Example
///
/// ```
/// use gurubu_domain::estimation::Votes;
///
/// let mut votes = Votes::new();
/// votes.cast("alice", "3");
/// votes.cast("alice", "5");
/// votes.join("bob");
///
/// assert_eq!(votes.len(), 2);
/// assert_eq!(votes.cast_count(), 1);
/// assert_eq!(votes.get("alice").map(|l| l.as_str()), Some("5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Votes {
    entries: BTreeMap<ParticipantId, Option<Label>>,
}

impl Votes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote, replacing any earlier vote by the same participant
    pub fn cast(&mut self, participant: impl Into<ParticipantId>, label: impl Into<Label>) {
        self.entries.insert(participant.into(), Some(label.into()));
    }

    /// Register a participant without a vote (keeps an existing vote)
    pub fn join(&mut self, participant: impl Into<ParticipantId>) {
        self.entries.entry(participant.into()).or_insert(None);
    }

    /// Withdraw a participant's vote; the participant stays in the round
    pub fn retract(&mut self, participant: &str) {
        if let Some(vote) = self.entries.get_mut(&ParticipantId::new(participant)) {
            *vote = None;
        }
    }

    /// Clear every vote at once, e.g. when moving to the next item
    pub fn clear(&mut self) {
        for vote in self.entries.values_mut() {
            *vote = None;
        }
    }

    /// The participant's current vote, if any
    pub fn get(&self, participant: &str) -> Option<&Label> {
        self.entries
            .get(&ParticipantId::new(participant))
            .and_then(Option::as_ref)
    }

    /// Number of participants, voted or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of participants that currently hold a vote
    pub fn cast_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// All participants with their vote, in participant order
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Option<&Label>)> {
        self.entries.iter().map(|(id, vote)| (id, vote.as_ref()))
    }

    /// Only the votes that are present
    pub fn cast_votes(&self) -> impl Iterator<Item = &Label> {
        self.entries.values().filter_map(Option::as_ref)
    }
}

impl<P, L> FromIterator<(P, Option<L>)> for Votes
where
    P: Into<ParticipantId>,
    L: Into<Label>,
{
    fn from_iter<T: IntoIterator<Item = (P, Option<L>)>>(iter: T) -> Self {
        let mut votes = Votes::new();
        for (participant, label) in iter {
            match label {
                Some(label) => votes.cast(participant, label),
                None => votes.join(participant),
            }
        }
        votes
    }
}
