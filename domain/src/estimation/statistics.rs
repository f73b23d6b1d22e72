//! Summary statistics over a tally

use super::scale::PointScale;
use super::tally::VoteTally;
use serde::{Deserialize, Serialize};

/// Averages and spread of the counted votes
///
/// Only labels with a numeric value take part in `average`, `min` and `max`;
/// "?" or t-shirt sizes are counted in `counted` but nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteStatistics {
    /// Votes that landed on a scale label
    pub counted: usize,
    /// Counted votes whose label is numeric
    pub numeric_votes: usize,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Every counted vote is on the same label (requires at least one vote)
    pub unanimous: bool,
}

impl VoteStatistics {
    pub fn compute(scale: &PointScale, tally: &VoteTally) -> Self {
        let counted = tally.total();
        let mut numeric_votes = 0usize;
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for (label, count) in tally.entries(scale) {
            if count == 0 {
                continue;
            }
            let Some(value) = label.as_numeric() else {
                continue;
            };
            numeric_votes += count;
            sum += value * count as f64;
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
        }

        let average = (numeric_votes > 0).then(|| sum / numeric_votes as f64);
        let distinct = tally.counts().iter().filter(|&&c| c > 0).count();

        Self {
            counted,
            numeric_votes,
            average,
            min,
            max,
            unanimous: counted > 0 && distinct == 1,
        }
    }

    /// Distance between the highest and lowest numeric vote
    pub fn spread(&self) -> Option<f64> {
        Some(self.max? - self.min?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_ignores_non_numeric() {
        let scale = PointScale::new(["1", "2", "3", "?"]).unwrap();
        let stats = VoteStatistics::compute(&scale, &VoteTally::from_counts(vec![1, 0, 1, 2]));

        assert_eq!(stats.counted, 4);
        assert_eq!(stats.numeric_votes, 2);
        assert_eq!(stats.average, Some(2.0));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(3.0));
        assert_eq!(stats.spread(), Some(2.0));
        assert!(!stats.unanimous);
    }

    #[test]
    fn test_weighted_average() {
        let scale = PointScale::new(["1", "2", "3", "5", "8"]).unwrap();
        let stats = VoteStatistics::compute(&scale, &VoteTally::from_counts(vec![0, 0, 2, 1, 0]));
        let avg = stats.average.unwrap();
        assert!((avg - 11.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_votes() {
        let scale = PointScale::fibonacci();
        let stats = VoteStatistics::compute(&scale, &VoteTally::from_counts(vec![0; scale.len()]));
        assert_eq!(stats, VoteStatistics::default());
        assert_eq!(stats.spread(), None);
    }

    #[test]
    fn test_unanimous() {
        let scale = PointScale::t_shirt();
        let stats = VoteStatistics::compute(&scale, &VoteTally::from_counts(vec![0, 0, 3, 0, 0, 0]));
        assert!(stats.unanimous);
        assert_eq!(stats.average, None);
    }
}
