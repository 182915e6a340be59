use serde::{Deserialize, Serialize};

/// Embedded frames on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IframeSurface {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub third_party_count: u32,
    #[serde(default)]
    pub items: Vec<IframeRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IframeRecord {
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub is_third_party: bool,
    /// Frame carries a `sandbox` attribute.
    #[serde(default)]
    pub is_sandboxed: bool,
}
