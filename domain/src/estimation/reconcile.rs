//! Reconciliation of human votes with an AI-suggested estimate

use super::ai_estimate::AiEstimate;
use super::label::{Label, labels_equal};
use super::scale::PointScale;
use super::statistics::VoteStatistics;
use super::tally::VoteTally;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Advisory result shown to the room administrator
///
/// Recomputed whenever the tally or the AI estimate changes; it is never the
/// authoritative record of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub scale: PointScale,
    pub tally: VoteTally,
    /// Label with the most votes, `None` without votes
    pub human_majority: Option<Label>,
    /// Only ever holds an estimate with status `ok`
    pub ai_estimate: Option<AiEstimate>,
    /// Human majority and AI estimate name the same label
    pub agreement: bool,
    pub statistics: VoteStatistics,
}

impl ReconciliationSummary {
    /// Whether the AI suggests splitting the item
    pub fn split_recommended(&self) -> bool {
        self.ai_estimate
            .as_ref()
            .is_some_and(|ai| ai.split_recommendation)
    }

    /// Value to preselect in the suggestion banner
    ///
    /// The AI estimate when it names a label on the scale, otherwise the
    /// human majority.
    pub fn suggested_label(&self) -> Option<Label> {
        self.ai_estimate
            .as_ref()
            .and_then(|ai| {
                let wanted = ai.estimation.normalized();
                self.scale
                    .iter()
                    .find(|label| label.normalized() == wanted)
                    .cloned()
            })
            .or_else(|| self.human_majority.clone())
    }

    pub fn has_votes(&self) -> bool {
        self.tally.total() > 0
    }
}

/// Combine a tally with an optional AI estimate
///
/// Ties between labels with the same highest count go to the label that
/// comes first on the scale. An AI estimate whose status is not `ok` is
/// dropped from the summary.
///
/// Fails with [`DomainError::InvalidScale`] when the tally was not computed
/// against a scale of the same length.
///
/// # Example
///
/// ```
/// use gurubu_domain::estimation::{reconcile, AiEstimate, PointScale, VoteTally, Votes};
///
/// let scale: PointScale = "1,2,3".parse().unwrap();
/// let mut votes = Votes::new();
/// votes.cast("A", "1");
/// votes.cast("B", "2");
///
/// let tally = VoteTally::compute(&scale, &votes);
/// let summary = reconcile(&tally, &scale, Some(AiEstimate::new(1.0))).unwrap();
///
/// assert_eq!(summary.human_majority.as_ref().map(|l| l.as_str()), Some("1"));
/// assert!(summary.agreement);
/// ```
pub fn reconcile(
    tally: &VoteTally,
    scale: &PointScale,
    ai_estimate: Option<AiEstimate>,
) -> Result<ReconciliationSummary, DomainError> {
    if tally.len() != scale.len() {
        return Err(DomainError::InvalidScale(format!(
            "tally has {} counts but the scale has {} labels",
            tally.len(),
            scale.len()
        )));
    }

    let human_majority = tally
        .leading_index()
        .and_then(|i| scale.get(i))
        .cloned();

    let ai_estimate = ai_estimate.filter(AiEstimate::is_usable);

    let agreement = match (&human_majority, &ai_estimate) {
        (Some(majority), Some(ai)) => labels_equal(majority, &ai.estimation),
        _ => false,
    };

    Ok(ReconciliationSummary {
        scale: scale.clone(),
        tally: tally.clone(),
        human_majority,
        ai_estimate,
        agreement,
        statistics: VoteStatistics::compute(scale, tally),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::{AiEstimateStatus, EstimateValue, Votes};

    fn scale(list: &str) -> PointScale {
        list.parse().unwrap()
    }

    fn tally_of(scale: &PointScale, list: &[(&str, &str)]) -> VoteTally {
        let mut votes = Votes::new();
        for (p, l) in list {
            votes.cast(*p, *l);
        }
        VoteTally::compute(scale, &votes)
    }

    #[test]
    fn test_unique_majority() {
        let s = scale("1,2,3,5,8");
        let t = tally_of(&s, &[("A", "3"), ("B", "3"), ("C", "5")]);
        let summary = reconcile(&t, &s, None).unwrap();
        assert_eq!(summary.human_majority, Some(Label::new("3")));
        assert!(!summary.agreement);
        assert!(summary.ai_estimate.is_none());
    }

    #[test]
    fn test_tie_goes_to_first_on_scale() {
        let s = scale("1,2,3");
        let t = tally_of(&s, &[("A", "1"), ("B", "2")]);
        assert_eq!(t.counts(), &[1, 1, 0]);
        let summary = reconcile(&t, &s, None).unwrap();
        assert_eq!(summary.human_majority, Some(Label::new("1")));
    }

    #[test]
    fn test_tie_respects_scale_order_not_value() {
        let s = scale("8,5,3");
        let t = VoteTally::from_counts(vec![0, 2, 2]);
        let summary = reconcile(&t, &s, None).unwrap();
        assert_eq!(summary.human_majority, Some(Label::new("5")));
    }

    #[test]
    fn test_no_votes_no_majority_no_agreement() {
        let s = scale("1,2,3");
        let t = tally_of(&s, &[]);
        let summary = reconcile(&t, &s, Some(AiEstimate::new("1").with_confidence(0.9))).unwrap();
        assert_eq!(t.counts(), &[0, 0, 0]);
        assert_eq!(summary.human_majority, None);
        assert!(!summary.agreement);
        assert!(summary.ai_estimate.is_some());
        assert!(!summary.has_votes());
    }

    #[test]
    fn test_numeric_ai_estimate_agrees_with_string_label() {
        let s = scale("1,2,3,5,8");
        let t = tally_of(&s, &[("A", "5")]);
        let summary = reconcile(&t, &s, Some(AiEstimate::new(5.0))).unwrap();
        assert!(summary.agreement);
    }

    #[test]
    fn test_disagreement() {
        let s = scale("1,2,3,5,8");
        let t = tally_of(&s, &[("A", "5")]);
        let summary = reconcile(&t, &s, Some(AiEstimate::new("8"))).unwrap();
        assert!(!summary.agreement);
        assert_eq!(summary.suggested_label(), Some(Label::new("8")));
    }

    #[test]
    fn test_non_ok_estimate_is_dropped() {
        let s = scale("1,2,3,5,8");
        let t = tally_of(&s, &[("A", "5")]);
        for status in [AiEstimateStatus::Unavailable, AiEstimateStatus::Error] {
            let mut ai = AiEstimate::new(5.0)
                .with_confidence(0.99)
                .with_split_recommendation(true);
            ai.status = status;

            let summary = reconcile(&t, &s, Some(ai)).unwrap();
            assert!(summary.ai_estimate.is_none());
            assert!(!summary.agreement);
            assert!(!summary.split_recommended());
            assert_eq!(summary.suggested_label(), Some(Label::new("5")));
        }
    }

    #[test]
    fn test_split_recommendation_passthrough() {
        let s = scale("1,2,3,5,8,13");
        let t = tally_of(&s, &[("A", "13"), ("B", "13")]);
        let ai = AiEstimate::new(EstimateValue::Text(" 13 ".into())).with_split_recommendation(true);
        let summary = reconcile(&t, &s, Some(ai)).unwrap();
        assert!(summary.agreement);
        assert!(summary.split_recommended());
    }

    #[test]
    fn test_suggested_label_off_scale_falls_back_to_majority() {
        let s = scale("1,2,3");
        let t = tally_of(&s, &[("A", "2")]);
        let summary = reconcile(&t, &s, Some(AiEstimate::new(40.0))).unwrap();
        assert_eq!(summary.suggested_label(), Some(Label::new("2")));
    }

    #[test]
    fn test_mismatched_tally_is_rejected() {
        let s = scale("1,2,3");
        let t = VoteTally::from_counts(vec![1, 0]);
        assert!(matches!(
            reconcile(&t, &s, None),
            Err(DomainError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_summary_carries_statistics() {
        let s = scale("1,2,3,5,8");
        let t = tally_of(&s, &[("A", "3"), ("B", "3")]);
        let summary = reconcile(&t, &s, None).unwrap();
        assert!(summary.statistics.unanimous);
        assert_eq!(summary.statistics.average, Some(3.0));
    }
}
