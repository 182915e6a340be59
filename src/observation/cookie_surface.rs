use serde::{Deserialize, Serialize};

/// Cookies visible to the page, pre-classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSurface {
    #[serde(default)]
    pub count: u32,
    /// Cookies matching a tracking rule.
    #[serde(default)]
    pub tracking_count: u32,
    /// Everything else. `tracking_count + functional_count == count`.
    #[serde(default)]
    pub functional_count: u32,
    #[serde(default)]
    pub session_count: u32,
    #[serde(default)]
    pub persistent_count: u32,
    #[serde(default)]
    pub items: Vec<CookieRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub is_tracking: bool,
    #[serde(default)]
    pub is_session: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}
