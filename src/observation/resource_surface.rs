use serde::{Deserialize, Serialize};

/// Image and frame sources checked for tracking pixels and beacons.
///
/// Display only; the score counts third-party iframes through
/// [`super::IframeSurface`] and ignores this surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSurface {
    /// Resources with a non-empty source that were examined.
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub tracking_count: u32,
    /// Tracking resources only.
    #[serde(default)]
    pub items: Vec<TrackingResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResource {
    pub element: ResourceElement,
    pub source_url: String,
    #[serde(default)]
    pub domain: String,
    /// The rule marker found in the source URL.
    pub marker: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceElement {
    Img,
    Iframe,
}

impl std::fmt::Display for ResourceElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Img => write!(f, "img"),
            Self::Iframe => write!(f, "iframe"),
        }
    }
}
