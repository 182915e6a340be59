//! Response-header evaluation: security header strength and information
//! exposure.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::observation::{HeaderCheck, HeaderExposure, HeaderSurface};

/// What a header value must satisfy to count as secure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum HeaderRequirement {
    /// Any value.
    Present,
    /// Value contains one of the fragments (case-insensitive).
    Contains { any: Vec<String> },
    /// Value equals one of the options (case-insensitive).
    OneOf { values: Vec<String> },
    /// Value is at least this many characters long.
    MinLength { chars: usize },
}

impl HeaderRequirement {
    pub fn is_met(&self, value: &str) -> bool {
        let lower = value.trim().to_lowercase();
        match self {
            Self::Present => true,
            Self::Contains { any } => any.iter().any(|f| lower.contains(&f.to_lowercase())),
            Self::OneOf { values } => values.iter().any(|v| lower == v.to_lowercase()),
            Self::MinLength { chars } => value.chars().count() >= *chars,
        }
    }
}

impl std::fmt::Display for HeaderRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Contains { any } => write!(f, "contains {}", any.join(" | ")),
            Self::OneOf { values } => write!(f, "one of {}", values.join(" | ")),
            Self::MinLength { chars } => write!(f, "at least {chars} chars"),
        }
    }
}

/// One security header to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRule {
    /// Header name, matched case-insensitively.
    pub header: String,
    pub label: String,
    #[serde(flatten)]
    pub requirement: HeaderRequirement,
}

impl HeaderRule {
    pub fn new(header: &str, label: &str, requirement: HeaderRequirement) -> Self {
        Self {
            header: header.to_lowercase(),
            label: label.into(),
            requirement,
        }
    }
}

/// A header whose value, when longer than `longer_than` characters, exposes
/// implementation details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRule {
    pub header: String,
    #[serde(default)]
    pub longer_than: usize,
    pub description: String,
}

impl ExposureRule {
    pub fn new(header: &str, longer_than: usize, description: &str) -> Self {
        Self {
            header: header.to_lowercase(),
            longer_than,
            description: description.into(),
        }
    }
}

/// Evaluate captured response headers. Only the first rule for a given
/// header name applies, so earlier rules shadow later ones.
pub fn evaluate_headers(
    header_rules: &[HeaderRule],
    exposure_rules: &[ExposureRule],
    headers: &BTreeMap<String, String>,
) -> HeaderSurface {
    let lookup: BTreeMap<String, &str> = headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.as_str()))
        .collect();

    let mut seen = HashSet::new();
    let checks = header_rules
        .iter()
        .filter(|r| seen.insert(r.header.to_lowercase()))
        .map(|rule| {
            let value = lookup.get(&rule.header.to_lowercase()).copied();
            HeaderCheck {
                header: rule.header.to_lowercase(),
                label: rule.label.clone(),
                present: value.is_some(),
                secure: value.is_some_and(|v| !v.trim().is_empty() && rule.requirement.is_met(v)),
                value: value.map(str::to_string),
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let exposures = exposure_rules
        .iter()
        .filter(|r| seen.insert(r.header.to_lowercase()))
        .filter_map(|rule| {
            let value = lookup.get(&rule.header.to_lowercase())?;
            (!value.trim().is_empty() && value.chars().count() > rule.longer_than).then(|| {
                HeaderExposure {
                    header: rule.header.to_lowercase(),
                    value: value.to_string(),
                    description: rule.description.clone(),
                }
            })
        })
        .collect();

    HeaderSurface {
        inspected: true,
        checks,
        exposures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn check<'a>(surface: &'a HeaderSurface, label: &str) -> &'a HeaderCheck {
        surface.checks.iter().find(|c| c.label == label).unwrap()
    }

    #[test]
    fn hardened_headers_are_secure() {
        let surface = evaluate_headers(
            &builtin::header_rules(),
            &builtin::exposure_rules(),
            &headers(&[
                ("Strict-Transport-Security", "max-age=31536000; includeSubDomains"),
                ("X-Frame-Options", "SAMEORIGIN"),
                ("Referrer-Policy", "strict-origin-when-cross-origin"),
                ("Content-Security-Policy", "default-src 'self'"),
            ]),
        );
        assert!(surface.inspected);
        assert!(check(&surface, "HSTS").secure);
        assert!(check(&surface, "X-Frame-Options").secure);
        assert!(check(&surface, "Referrer-Policy").secure);
        assert!(check(&surface, "CSP").secure);
        assert!(!check(&surface, "Permissions-Policy").present);
        assert!(surface.exposures.is_empty());
    }

    #[test]
    fn weak_values_are_flagged() {
        let surface = evaluate_headers(
            &builtin::header_rules(),
            &builtin::exposure_rules(),
            &headers(&[
                ("strict-transport-security", "includeSubDomains"),
                ("x-frame-options", "ALLOW-FROM https://a.test"),
                ("referrer-policy", "unsafe-url"),
                ("content-security-policy", "*"),
            ]),
        );
        for label in ["HSTS", "X-Frame-Options", "Referrer-Policy", "CSP"] {
            let c = check(&surface, label);
            assert!(c.present && !c.secure, "{label} should be weak");
        }
        assert_eq!(surface.weak().count(), builtin::header_rules().len());
    }

    #[test]
    fn server_details_and_stack_are_exposed() {
        let surface = evaluate_headers(
            &builtin::header_rules(),
            &builtin::exposure_rules(),
            &headers(&[
                ("Server", "Apache/2.4.41 (Ubuntu) OpenSSL/1.1.1f"),
                ("X-Powered-By", "PHP/7.4.3"),
            ]),
        );
        let names: Vec<&str> = surface.exposures.iter().map(|e| e.header.as_str()).collect();
        assert_eq!(names, vec!["server", "x-powered-by"]);
        assert_eq!(surface.exposures[1].value, "PHP/7.4.3");
    }

    #[test]
    fn short_server_banner_is_not_exposure() {
        let surface = evaluate_headers(
            &builtin::header_rules(),
            &builtin::exposure_rules(),
            &headers(&[("server", "nginx")]),
        );
        assert!(surface.exposures.is_empty());
    }

    #[test]
    fn earlier_rule_shadows_later_one() {
        let rules = vec![
            HeaderRule::new("X-Frame-Options", "XFO (strict)", HeaderRequirement::OneOf {
                values: vec!["deny".into()],
            }),
            HeaderRule::new("x-frame-options", "X-Frame-Options", HeaderRequirement::Present),
        ];
        let surface = evaluate_headers(&rules, &[], &headers(&[("x-frame-options", "sameorigin")]));
        assert_eq!(surface.checks.len(), 1);
        assert!(!surface.checks[0].secure);
    }

    #[test]
    fn requirement_display() {
        assert_eq!(HeaderRequirement::Present.to_string(), "present");
        assert_eq!(
            HeaderRequirement::OneOf {
                values: vec!["deny".into(), "sameorigin".into()]
            }
            .to_string(),
            "one of deny | sameorigin"
        );
        assert_eq!(HeaderRequirement::MinLength { chars: 11 }.to_string(), "at least 11 chars");
    }

    #[test]
    fn requirement_deserializes_from_toml_shape() {
        let rule: HeaderRule = toml::from_str(
            "header = \"x-frame-options\"\nlabel = \"XFO\"\ncheck = \"one_of\"\nvalues = [\"deny\"]\n",
        )
        .unwrap();
        assert_eq!(
            rule.requirement,
            HeaderRequirement::OneOf {
                values: vec!["deny".into()]
            }
        );
    }
}
