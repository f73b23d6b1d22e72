//! Label value objects
//!
//! A [`Label`] is one permitted estimate token on a point scale ("3", "8", "?").
//! [`EstimateValue`] is what an external estimator hands back, which may be a
//! JSON number or a string.

use serde::{Deserialize, Serialize};

/// A permitted estimate token
///
/// Labels are opaque text: they are not required to be numeric.
///
/// # Example
///
/// ```
/// use gurubu_domain::estimation::Label;
///
/// let label = Label::new(" 5 ");
/// assert_eq!(label.normalized(), "5");
/// assert_eq!(label.as_numeric(), Some(5.0));
/// assert_eq!(Label::new("?").as_numeric(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label exactly as configured
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed form used when comparing against values from other systems
    pub fn normalized(&self) -> &str {
        self.0.trim()
    }

    /// Numeric value of the label, if it has one ("?" and "XL" do not)
    pub fn as_numeric(&self) -> Option<f64> {
        self.normalized()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Compare against an externally sourced estimate after normalization
    pub fn matches(&self, value: &EstimateValue) -> bool {
        self.normalized() == value.normalized()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An estimate as produced by an external system
///
/// AI services answer with either `5` or `"5"`; both must compare equal to
/// the label `"5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstimateValue {
    Number(f64),
    Text(String),
}

impl EstimateValue {
    /// Trimmed string form of the value.
    ///
    /// Numbers stringify the way a JSON runtime prints them: integral values
    /// drop the fractional part (`5.0` becomes `"5"`).
    pub fn normalized(&self) -> String {
        match self {
            EstimateValue::Number(n) => format_number(*n),
            EstimateValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Convert to a label using the normalized form
    pub fn to_label(&self) -> Label {
        Label::new(self.normalized())
    }
}

impl Default for EstimateValue {
    fn default() -> Self {
        EstimateValue::Text(String::new())
    }
}

impl From<f64> for EstimateValue {
    fn from(n: f64) -> Self {
        EstimateValue::Number(n)
    }
}

impl From<&str> for EstimateValue {
    fn from(s: &str) -> Self {
        EstimateValue::Text(s.to_string())
    }
}

impl From<String> for EstimateValue {
    fn from(s: String) -> Self {
        EstimateValue::Text(s)
    }
}

impl std::fmt::Display for EstimateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Compare two labels after trimming both sides
pub fn labels_equal(a: &Label, b: &EstimateValue) -> bool {
    a.matches(b)
}
