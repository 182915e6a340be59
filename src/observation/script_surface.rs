use serde::{Deserialize, Serialize};

use crate::rules::ScriptCategory;

/// External scripts (`<script src>`) loaded by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSurface {
    #[serde(default)]
    pub count: u32,
    /// Scripts from tracking-related services (analytics, social, ads).
    #[serde(default)]
    pub tracking_count: u32,
    /// Subset of scripts classified as analytics.
    #[serde(default)]
    pub analytics_count: u32,
    #[serde(default)]
    pub items: Vec<ScriptRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub source_url: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub classification: ScriptCategory,
    /// Service name of the matching rule, when one matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default)]
    pub is_third_party: bool,
}
