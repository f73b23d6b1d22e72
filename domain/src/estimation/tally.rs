//! Vote tally
//!
//! Counts votes per label of a [`PointScale`]. The tally is always computed
//! from scratch out of the full vote set; it is never patched incrementally.

use super::label::Label;
use super::scale::PointScale;
use super::vote::Votes;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Per-label vote counts, positionally aligned with the scale they were
/// computed against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    counts: Vec<usize>,
}

impl VoteTally {
    /// Count every present vote whose label is on the scale
    ///
    /// Votes for labels the scale does not know (for example after the scale
    /// was changed mid-round) are left out of every count.
    ///
    /// # Example
    ///
    /// ```
    /// use gurubu_domain::estimation::{PointScale, VoteTally, Votes};
    ///
    /// let scale: PointScale = "1,2,3,5,8".parse().unwrap();
    /// let mut votes = Votes::new();
    /// votes.cast("A", "3");
    /// votes.cast("B", "3");
    /// votes.cast("C", "5");
    ///
    /// let tally = VoteTally::compute(&scale, &votes);
    /// assert_eq!(tally.counts(), &[0, 0, 2, 1, 0]);
    /// ```
    pub fn compute(scale: &PointScale, votes: &Votes) -> Self {
        let index = scale.index();
        let mut counts = vec![0usize; scale.len()];

        for label in votes.cast_votes() {
            if let Some(&slot) = index.get(label.as_str()) {
                counts[slot] += 1;
            }
        }

        Self { counts }
    }

    /// Wrap precomputed counts (e.g. received from another node)
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of votes that were counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pair each label of `scale` with its count, in scale order
    pub fn entries<'a>(&'a self, scale: &'a PointScale) -> impl Iterator<Item = (&'a Label, usize)> {
        scale.iter().zip(self.counts.iter().copied())
    }

    /// Slot holding the highest count, first slot wins on ties.
    ///
    /// `None` when no vote was counted.
    pub fn leading_index(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, &count) in self.counts.iter().enumerate() {
            if count > best.map_or(0, |(_, max)| max) {
                best = Some((i, count));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Tally votes against a scale given as a plain label list
///
/// Validates the scale first and fails with [`DomainError::InvalidScale`]
/// when it is empty or contains duplicates.
pub fn tally(scale: &[Label], votes: &Votes) -> Result<VoteTally, DomainError> {
    let scale = PointScale::new(scale.to_vec())?;
    Ok(VoteTally::compute(&scale, votes))
}
