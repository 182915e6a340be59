use serde::{Deserialize, Serialize};

/// Security-relevant response headers of the page document.
///
/// Empty unless the collector captured response headers. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSurface {
    /// Whether response headers were available at all.
    #[serde(default)]
    pub inspected: bool,
    #[serde(default)]
    pub checks: Vec<HeaderCheck>,
    #[serde(default)]
    pub exposures: Vec<HeaderExposure>,
}

impl HeaderSurface {
    /// Checked headers that are absent or carry a weak value.
    pub fn weak(&self) -> impl Iterator<Item = &HeaderCheck> {
        self.checks.iter().filter(|c| !c.secure)
    }
}

/// Outcome of one header rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCheck {
    /// Lowercase header name.
    pub header: String,
    /// Short display name, e.g. "HSTS".
    pub label: String,
    pub present: bool,
    #[serde(default)]
    pub value: Option<String>,
    pub secure: bool,
}

/// A header that reveals server or technology details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExposure {
    pub header: String,
    pub value: String,
    pub description: String,
}
