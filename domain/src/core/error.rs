//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Unknown vote labels and failed AI estimates are absorbed into results and
/// never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The point scale is empty, has a blank label, has a duplicate label,
    /// or does not line up with the tally it is used with
    #[error("Invalid point scale: {0}")]
    InvalidScale(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scale_display() {
        let error = DomainError::InvalidScale("scale has no labels".to_string());
        assert_eq!(error.to_string(), "Invalid point scale: scale has no labels");
    }
}
