use serde::{Deserialize, Serialize};

/// A tracking-resource marker: case-insensitive substring of an image or
/// frame source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRule {
    pub pattern: String,
}

impl ResourceRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn matches(&self, source_url: &str) -> bool {
        !self.pattern.is_empty() && source_url.to_lowercase().contains(&self.pattern.to_lowercase())
    }
}

/// First rule whose marker occurs in `source_url`, if any.
pub fn classify_resource<'a>(rules: &'a [ResourceRule], source_url: &str) -> Option<&'a ResourceRule> {
    rules.iter().find(|r| r.matches(source_url))
}
