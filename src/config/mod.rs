use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};
use crate::rules::RulesConfig;
use crate::scoring::Policy;

/// File name looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".privacylens.toml";

/// Top-level configuration from `.privacylens.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.policy.fail_below > 100 {
            return Err(PrivacyError::Config(format!(
                "policy.fail_below must be between 0 and 100, got {}",
                self.policy.fail_below
            )));
        }
        if let Some(rule) = self.rules.cookie.iter().find(|r| r.pattern.trim().is_empty()) {
            return Err(PrivacyError::Config(format!(
                "cookie rule on field '{}' has an empty pattern",
                rule.field
            )));
        }
        if let Some(rule) = self.rules.script.iter().find(|r| r.domain.trim().is_empty()) {
            return Err(PrivacyError::Config(format!(
                "script rule with category '{}' has an empty domain",
                rule.category
            )));
        }
        if self.rules.resource.iter().any(|r| r.pattern.trim().is_empty()) {
            return Err(PrivacyError::Config(
                "resource rule has an empty pattern".into(),
            ));
        }
        if let Some(rule) = self.rules.header.iter().find(|r| r.header.trim().is_empty()) {
            return Err(PrivacyError::Config(format!(
                "header rule '{}' has an empty header name",
                rule.label
            )));
        }
        if let Some(rule) = self.rules.exposure.iter().find(|r| r.header.trim().is_empty()) {
            return Err(PrivacyError::Config(format!(
                "exposure rule '{}' has an empty header name",
                rule.description
            )));
        }
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# PrivacyLens configuration

[policy]
# Pages scoring below this fail the run (0-100).
fail_below = 50

[rules]
# Use only the rules below and ignore the built-in tables.
# replace_builtin = false

# Extra tracking-cookie markers. `field` is "name" (default) or "domain".
# [[rules.cookie]]
# pattern = "_hj"
#
# [[rules.cookie]]
# pattern = "hotjar.com"
# field = "domain"

# Extra script rules, checked before the built-in table.
# [[rules.script]]
# domain = "static.hotjar.com"
# category = "analytics"
# tracking = true
# analytics = true
# service = "Hotjar"

# Extra image/iframe source markers for tracking pixels and beacons.
# [[rules.resource]]
# pattern = "collect?"

# Security header checks, applied before the built-in ones. `check` is
# "present", "contains" (any), "one_of" (values) or "min_length" (chars).
# [[rules.header]]
# header = "cross-origin-opener-policy"
# label = "COOP"
# check = "one_of"
# values = ["same-origin"]

# Headers that leak implementation details when longer than `longer_than`.
# [[rules.exposure]]
# header = "x-aspnet-version"
# description = "Framework version exposed"
"#
    }
}
