use serde::{Deserialize, Serialize};

/// Which cookie attribute a [`CookieRule`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Name,
    Domain,
}

impl std::fmt::Display for MatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

/// A tracking-cookie marker: case-sensitive substring of the cookie's name
/// or domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRule {
    pub pattern: String,
    #[serde(default = "default_field")]
    pub field: MatchField,
}

fn default_field() -> MatchField {
    MatchField::Name
}

impl CookieRule {
    pub fn name(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            field: MatchField::Name,
        }
    }

    pub fn domain(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            field: MatchField::Domain,
        }
    }

    pub fn matches(&self, name: &str, domain: &str) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        let haystack = match self.field {
            MatchField::Name => name,
            MatchField::Domain => domain,
        };
        haystack.contains(self.pattern.as_str())
    }
}

/// Whether a cookie is tracking-related. Any matching rule makes it so;
/// cookies matching nothing are functional.
pub fn classify_cookie(rules: &[CookieRule], name: &str, domain: &str) -> bool {
    rules.iter().any(|r| r.matches(name, domain))
}
