//! Point scale for an estimation round

use super::label::Label;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered set of labels participants may vote with
///
/// A scale is validated on construction: it is never empty, never contains
/// a blank label and never contains the same label twice. Order is used for
/// display and for breaking ties, it does not imply numeric ordering.
///
/// # Example
///
/// ```
/// use gurubu_domain::estimation::PointScale;
///
/// let scale: PointScale = "1,2,3,5,8".parse().unwrap();
/// assert_eq!(scale.len(), 5);
/// assert_eq!(scale.position("5"), Some(3));
///
/// assert!("1,2,2".parse::<PointScale>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct PointScale {
    labels: Vec<Label>,
}

impl PointScale {
    /// Create a scale, rejecting empty, blank or duplicate labels
    pub fn new<I, L>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(DomainError::InvalidScale("scale has no labels".to_string()));
        }

        Self::validate(&labels)?;
        Ok(Self { labels })
    }

    fn validate(labels: &[Label]) -> Result<(), DomainError> {
        let mut seen = HashMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if label.normalized().is_empty() {
                return Err(DomainError::InvalidScale(format!(
                    "label at position {} is blank",
                    index + 1
                )));
            }
            // Trimmed, like every other label comparison
            if let Some(first) = seen.insert(label.normalized(), index) {
                return Err(DomainError::InvalidScale(format!(
                    "duplicate label '{}' at positions {} and {}",
                    label.normalized(),
                    first + 1,
                    index + 1
                )));
            }
        }
        Ok(())
    }

    /// Fibonacci-like planning poker scale: 1, 2, 3, 5, 8, 13, 21, ?
    pub fn fibonacci() -> Self {
        Self::from_static(&["1", "2", "3", "5", "8", "13", "21", "?"])
    }

    /// T-shirt sizes: XS, S, M, L, XL, ?
    pub fn t_shirt() -> Self {
        Self::from_static(&["XS", "S", "M", "L", "XL", "?"])
    }

    fn from_static(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| Label::new(*l)).collect(),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed scale; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Position of a label in scale order
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.as_str() == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Build the label -> slot lookup used by a single tally pass
    pub(crate) fn index(&self) -> HashMap<&str, usize> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

impl Default for PointScale {
    fn default() -> Self {
        Self::fibonacci()
    }
}

impl TryFrom<Vec<Label>> for PointScale {
    type Error = DomainError;

    fn try_from(labels: Vec<Label>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<PointScale> for Vec<Label> {
    fn from(scale: PointScale) -> Self {
        scale.labels
    }
}

impl std::str::FromStr for PointScale {
    type Err = DomainError;

    /// Parse a comma-separated list such as `"1,2,3,5,8,?"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fibonacci" | "fib" => return Ok(Self::fibonacci()),
            "tshirt" | "t-shirt" => return Ok(Self::t_shirt()),
            _ => {}
        }

        if s.trim().is_empty() {
            return Self::new(Vec::<Label>::new());
        }

        Self::new(s.split(',').map(|l| Label::new(l.trim())))
    }
}

impl std::fmt::Display for PointScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.labels.iter().map(Label::as_str).collect();
        write!(f, "{}", labels.join(", "))
    }
}
