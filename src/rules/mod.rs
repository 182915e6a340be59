pub mod builtin;
pub mod cookie;
pub mod fingerprint;
pub mod header;
pub mod resource;
pub mod script;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use cookie::{classify_cookie, CookieRule, MatchField};
pub use fingerprint::{detect_fingerprinting, FONT_PROBE_SET, FONT_PROBING_THRESHOLD};
pub use header::{evaluate_headers, ExposureRule, HeaderRequirement, HeaderRule};
pub use resource::{classify_resource, ResourceRule};
pub use script::{classify_script, ScriptCategory, ScriptClassification, ScriptRule};

use crate::observation::HeaderSurface;
use crate::scoring::{recommendation_rules, RecommendationMetadata};

/// The classification tables used by the engine.
///
/// Rules are plain data so a table can be tuned or replaced without touching
/// scoring. The default is the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub cookie_rules: Vec<CookieRule>,
    pub script_rules: Vec<ScriptRule>,
    pub resource_rules: Vec<ResourceRule>,
    pub header_rules: Vec<HeaderRule>,
    pub exposure_rules: Vec<ExposureRule>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Ruleset {
    pub fn builtin() -> Self {
        Self {
            cookie_rules: builtin::cookie_rules(),
            script_rules: builtin::script_rules(),
            resource_rules: builtin::resource_rules(),
            header_rules: builtin::header_rules(),
            exposure_rules: builtin::exposure_rules(),
        }
    }

    /// An empty table: every cookie is functional, every script unknown,
    /// no resource is a tracker and no header is checked.
    pub fn empty() -> Self {
        Self {
            cookie_rules: Vec::new(),
            script_rules: Vec::new(),
            resource_rules: Vec::new(),
            header_rules: Vec::new(),
            exposure_rules: Vec::new(),
        }
    }

    /// Build the effective ruleset from config. Custom rules are evaluated
    /// before built-ins so they can shadow a built-in script rule.
    pub fn from_config(config: &RulesConfig) -> Self {
        let mut ruleset = if config.replace_builtin {
            Self::empty()
        } else {
            Self::builtin()
        };
        ruleset.cookie_rules.splice(0..0, config.cookie.iter().cloned());
        ruleset.script_rules.splice(0..0, config.script.iter().cloned());
        ruleset.resource_rules.splice(0..0, config.resource.iter().cloned());
        ruleset.header_rules.splice(0..0, config.header.iter().cloned());
        ruleset.exposure_rules.splice(0..0, config.exposure.iter().cloned());
        ruleset
    }

    pub fn classify_cookie(&self, name: &str, domain: &str) -> bool {
        classify_cookie(&self.cookie_rules, name, domain)
    }

    pub fn classify_script(&self, source_url: &str) -> ScriptClassification {
        classify_script(&self.script_rules, source_url)
    }

    /// The tracking marker found in an image or frame source, if any.
    pub fn classify_resource(&self, source_url: &str) -> Option<&str> {
        classify_resource(&self.resource_rules, source_url).map(|r| r.pattern.as_str())
    }

    pub fn evaluate_headers(&self, headers: &BTreeMap<String, String>) -> HeaderSurface {
        evaluate_headers(&self.header_rules, &self.exposure_rules, headers)
    }
}

/// Every rule in effect, for `list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadataSet {
    pub cookie_rules: Vec<CookieRule>,
    pub script_rules: Vec<ScriptRule>,
    pub resource_rules: Vec<ResourceRule>,
    pub header_rules: Vec<HeaderRule>,
    pub exposure_rules: Vec<ExposureRule>,
    pub recommendation_rules: Vec<RecommendationMetadata>,
}

impl RuleMetadataSet {
    pub fn describe(ruleset: &Ruleset) -> Self {
        Self {
            cookie_rules: ruleset.cookie_rules.clone(),
            script_rules: ruleset.script_rules.clone(),
            resource_rules: ruleset.resource_rules.clone(),
            header_rules: ruleset.header_rules.clone(),
            exposure_rules: ruleset.exposure_rules.clone(),
            recommendation_rules: recommendation_rules().iter().map(|r| r.metadata()).collect(),
        }
    }
}

/// `[rules]` section of `.privacylens.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Drop the built-in tables and use only the rules listed here.
    #[serde(default)]
    pub replace_builtin: bool,
    /// Extra tracking-cookie markers.
    #[serde(default)]
    pub cookie: Vec<CookieRule>,
    /// Extra script rules, evaluated ahead of the built-in table.
    #[serde(default)]
    pub script: Vec<ScriptRule>,
    /// Extra tracking pixel and beacon markers.
    #[serde(default)]
    pub resource: Vec<ResourceRule>,
    /// Security header checks; one for a built-in header replaces it.
    #[serde(default)]
    pub header: Vec<HeaderRule>,
    /// Information-exposure checks; one for a built-in header replaces it.
    #[serde(default)]
    pub exposure: Vec<ExposureRule>,
}
