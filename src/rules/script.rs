use serde::{Deserialize, Serialize};

/// Service category of an external script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptCategory {
    Analytics,
    Social,
    Advertising,
    #[default]
    Unknown,
}

impl ScriptCategory {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "analytics" => Some(Self::Analytics),
            "social" => Some(Self::Social),
            "advertising" | "ads" | "ad" => Some(Self::Advertising),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScriptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analytics => write!(f, "analytics"),
            Self::Social => write!(f, "social"),
            Self::Advertising => write!(f, "advertising"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of the script classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRule {
    /// Substring searched for in the script URL.
    pub domain: String,
    pub category: ScriptCategory,
    #[serde(default = "default_true", alias = "tracking")]
    pub is_tracking_related: bool,
    #[serde(default, alias = "analytics")]
    pub is_analytics: bool,
    /// Human-readable service name, e.g. "Google Analytics".
    #[serde(default)]
    pub service: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ScriptRule {
    pub fn new(
        domain: &str,
        category: ScriptCategory,
        is_tracking_related: bool,
        is_analytics: bool,
        service: &str,
    ) -> Self {
        Self {
            domain: domain.into(),
            category,
            is_tracking_related,
            is_analytics,
            service: Some(service.into()),
        }
    }
}

/// Result of classifying one script URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptClassification {
    pub category: ScriptCategory,
    pub is_tracking_related: bool,
    pub is_analytics: bool,
    pub service: Option<String>,
}

impl ScriptClassification {
    pub fn unknown() -> Self {
        Self {
            category: ScriptCategory::Unknown,
            is_tracking_related: false,
            is_analytics: false,
            service: None,
        }
    }
}

impl From<&ScriptRule> for ScriptClassification {
    fn from(rule: &ScriptRule) -> Self {
        Self {
            category: rule.category,
            is_tracking_related: rule.is_tracking_related,
            is_analytics: rule.is_analytics,
            service: rule.service.clone(),
        }
    }
}

/// Classify a script by its source URL. Rules are evaluated top to bottom
/// and the first whose domain substring occurs in the URL wins.
pub fn classify_script(rules: &[ScriptRule], source_url: &str) -> ScriptClassification {
    rules
        .iter()
        .find(|r| !r.domain.is_empty() && source_url.contains(r.domain.as_str()))
        .map(ScriptClassification::from)
        .unwrap_or_else(ScriptClassification::unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin;

    #[test]
    fn analytics_script() {
        let c = classify_script(
            &builtin::script_rules(),
            "https://www.google-analytics.com/analytics.js",
        );
        assert_eq!(c.category, ScriptCategory::Analytics);
        assert!(c.is_tracking_related);
        assert!(c.is_analytics);
        assert_eq!(c.service.as_deref(), Some("Google Analytics"));
    }

    #[test]
    fn advertising_script_is_tracking_not_analytics() {
        let c = classify_script(
            &builtin::script_rules(),
            "https://securepubads.g.doubleclick.net/tag/js/gpt.js",
        );
        assert_eq!(c.category, ScriptCategory::Advertising);
        assert!(c.is_tracking_related);
        assert!(!c.is_analytics);
    }

    #[test]
    fn unmatched_script_is_unknown() {
        let c = classify_script(&builtin::script_rules(), "https://cdn.example.com/app.js");
        assert_eq!(c, ScriptClassification::unknown());
    }

    #[test]
    fn first_listed_rule_wins() {
        // Contains both facebook.com (social, listed 3rd) and
        // google-analytics.com (analytics, listed 1st).
        let url = "https://connect.facebook.com/proxy?u=https://google-analytics.com/collect";
        let c = classify_script(&builtin::script_rules(), url);
        assert_eq!(c.category, ScriptCategory::Analytics);
        assert_eq!(c.service.as_deref(), Some("Google Analytics"));
    }

    #[test]
    fn table_order_is_respected_for_custom_rules() {
        let rules = vec![
            ScriptRule::new("cdn.example", ScriptCategory::Social, true, false, "First"),
            ScriptRule::new("example", ScriptCategory::Analytics, true, true, "Second"),
        ];
        let c = classify_script(&rules, "https://cdn.example.com/x.js");
        assert_eq!(c.service.as_deref(), Some("First"));
    }

    #[test]
    fn rule_deserializes_with_short_aliases() {
        let rule: ScriptRule = toml::from_str(
            r#"
domain = "plausible.io"
category = "analytics"
analytics = true
"#,
        )
        .unwrap();
        assert!(rule.is_tracking_related);
        assert!(rule.is_analytics);
        assert_eq!(rule.service, None);
    }
}
