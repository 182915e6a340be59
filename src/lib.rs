//! PrivacyLens: privacy scoring and classification for observed web pages.
//!
//! Offline and deterministic. Takes the cookies, scripts, storage entries,
//! iframes and fingerprinting probes seen on a page, classifies them against
//! rule tables, and produces a 0-100 privacy score with per-category risk
//! tiers and recommendations.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use privacylens::{analyze, AnalyzeOptions};
//!
//! let options = AnalyzeOptions::default();
//! let reports = analyze(Path::new("observation.json"), &options).unwrap();
//! for report in &reports {
//!     println!("{}: {}", report.page_label(), report.result.score);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod observation;
pub mod output;
pub mod rules;
pub mod scoring;
pub mod source;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, DEFAULT_CONFIG_FILE};
use engine::PrivacyEngine;
use error::Result;
use observation::PageObservation;
use output::badge::Badge;
use output::OutputFormat;
use rules::Ruleset;
use scoring::{Policy, PolicyVerdict, ScoreResult};

/// Options for an analysis invocation.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Path to config file (defaults to `.privacylens.toml` next to the input).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for the pass threshold.
    pub fail_below_override: Option<u8>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            fail_below_override: None,
        }
    }
}

/// Observation, score and verdict for one page.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub observation: PageObservation,
    pub result: ScoreResult,
    pub verdict: PolicyVerdict,
}

impl AnalysisReport {
    /// Score an observation and judge it against `policy`.
    pub fn from_observation(
        engine: &PrivacyEngine,
        policy: &Policy,
        observation: PageObservation,
    ) -> Result<Self> {
        let result = engine.evaluate(&observation)?;
        let verdict = policy.evaluate(&result);
        Ok(Self {
            observation,
            result,
            verdict,
        })
    }

    /// Page domain, falling back to the URL.
    pub fn page_label(&self) -> &str {
        if !self.observation.page_domain.is_empty() {
            &self.observation.page_domain
        } else if !self.observation.page_url.is_empty() {
            &self.observation.page_url
        } else {
            observation::domain::UNKNOWN_DOMAIN
        }
    }

    pub fn badge(&self) -> Badge {
        Badge::for_score(self.result.score)
    }

    /// Named services among the page's scripts as `(service, domain)`, first
    /// occurrence of each service only.
    pub fn detected_services(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        self.observation
            .scripts
            .items
            .iter()
            .filter_map(|s| s.service.as_ref().map(|name| (name, &s.domain)))
            .filter(|(name, _)| seen.insert(name.as_str()))
            .map(|(name, domain)| (name.clone(), domain.clone()))
            .collect()
    }
}

/// Resolve the effective config: file, then CLI overrides.
pub fn load_config(input: &Path, options: &AnalyzeOptions) -> Result<Config> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| default_config_path(input));
    let mut config = Config::load(&config_path)?;

    if let Some(fail_below) = options.fail_below_override {
        config.policy.fail_below = fail_below;
    }
    Ok(config)
}

fn default_config_path(input: &Path) -> PathBuf {
    if input.as_os_str() == "-" {
        return PathBuf::from(DEFAULT_CONFIG_FILE);
    }
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join(DEFAULT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Run a complete analysis: load config, detect the input shape, score every
/// page and evaluate policy.
pub fn analyze(path: &Path, options: &AnalyzeOptions) -> Result<Vec<AnalysisReport>> {
    let config = load_config(path, options)?;
    let engine = PrivacyEngine::new(Ruleset::from_config(&config.rules));

    let observations = source::auto_detect_and_load(path, engine.ruleset())?;

    observations
        .into_iter()
        .map(|obs| AnalysisReport::from_observation(&engine, &config.policy, obs))
        .collect()
}

/// Render one report in the specified format.
pub fn render_report(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::error::PrivacyError;
    use crate::scoring::{RiskLevel, StatusTier};
    use std::path::Path;

    fn analyze_fixture(name: &str) -> Result<Vec<AnalysisReport>> {
        let path = Path::new("tests/fixtures").join(name);
        analyze(&path, &AnalyzeOptions::default())
    }

    #[test]
    fn tracking_cookie_heavy_page() {
        let reports = analyze_fixture("cookie_heavy.json").unwrap();
        let report = &reports[0];
        assert_eq!(report.result.score, 93);
        assert_eq!(report.result.status_tier(), StatusTier::Excellent);
        assert_eq!(report.result.risk_by_category.cookies, RiskLevel::High);
        assert_eq!(report.result.recommendations[0].id, "PL-REC-001");
        assert!(report.verdict.pass);
    }

    #[test]
    fn clean_page() {
        let reports = analyze_fixture("clean.json").unwrap();
        let report = &reports[0];
        assert_eq!(report.result.score, 100);
        assert_eq!(report.result.risk_by_category.highest(), RiskLevel::Low);
        assert_eq!(report.result.recommendations.len(), 1);
        assert_eq!(report.result.recommendations[0].id, "PL-REC-005");
        assert_eq!(report.observation.page_domain, "example.org");
    }

    #[test]
    fn snapshot_is_classified_on_load() {
        let reports = analyze_fixture("snapshot.json").unwrap();
        let report = &reports[0];
        let obs = &report.observation;
        assert_eq!(obs.cookies.count, 3);
        assert_eq!(obs.cookies.tracking_count, 2);
        assert_eq!(obs.scripts.tracking_count, 2);
        assert_eq!(obs.scripts.analytics_count, 1);
        assert_eq!(obs.iframes.third_party_count, 1);
        assert!(obs.fingerprinting.canvas_used);
        assert_eq!(obs.resources.count, 3);
        assert_eq!(obs.resources.tracking_count, 1);
        assert_eq!(obs.resources.items[0].marker, "pixel");
        assert!(obs.headers.inspected);
        let weak: Vec<&str> = obs.headers.weak().map(|c| c.label.as_str()).collect();
        assert!(!weak.contains(&"HSTS"));
        assert!(!weak.contains(&"X-Frame-Options"));
        assert!(weak.contains(&"CSP"));
        assert_eq!(obs.headers.exposures.len(), 1);
        assert_eq!(obs.headers.exposures[0].header, "x-powered-by");
        // tracking resources and headers do not move the score
        // 100 - (2*1.0 + 1*0.5 + 2*2.0 + 1*1.5 + 1*1.0 + 1*3.0) = 88
        assert_eq!(report.result.score, 88);
        assert_eq!(
            report.detected_services(),
            vec![
                ("Google Analytics".to_string(), "www.google-analytics.com".to_string()),
                ("Facebook SDK".to_string(), "connect.facebook.net".to_string()),
            ]
        );
    }

    #[test]
    fn extension_message_payload() {
        let reports = analyze_fixture("extension_message.json").unwrap();
        let report = &reports[0];
        assert_eq!(report.observation.page_domain, "shop.example.com");
        assert_eq!(report.result.score, 92);
        assert_eq!(report.result.risk_by_category.scripts, RiskLevel::High);
        assert_eq!(report.result.recommendations[0].id, "PL-REC-002");
    }

    #[test]
    fn batch_file_skips_unreadable_entries() {
        let reports = analyze_fixture("batch.json").unwrap();
        assert_eq!(reports.len(), 2);
        assert!(!reports[1].verdict.pass);
        assert_eq!(reports[1].result.score, 40);
    }

    #[test]
    fn batch_file_keeps_valid_pages_next_to_inconsistent_ones() {
        let reports = analyze_fixture("batch_mixed.json").unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].page_label(), "a.test");
        // 100 - (1*2.0 + 1*1.5) = 96.5, rounded up
        assert_eq!(reports[0].result.score, 97);
    }

    #[test]
    fn inconsistent_counts_are_rejected() {
        let err = analyze_fixture("invalid_counts.json").unwrap_err();
        assert!(matches!(err, PrivacyError::InvalidObservation { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn fail_below_override_applies() {
        let options = AnalyzeOptions {
            fail_below_override: Some(95),
            ..Default::default()
        };
        let reports = analyze(Path::new("tests/fixtures/cookie_heavy.json"), &options).unwrap();
        assert!(!reports[0].verdict.pass);
        assert_eq!(reports[0].verdict.fail_below, 95);
    }

    #[test]
    fn config_rules_change_classification() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &config,
            "[rules]\nreplace_builtin = true\n",
        )
        .unwrap();
        std::fs::copy(
            "tests/fixtures/snapshot.json",
            dir.path().join("snapshot.json"),
        )
        .unwrap();
        let reports = analyze(&dir.path().join("snapshot.json"), &AnalyzeOptions::default()).unwrap();
        let obs = &reports[0].observation;
        assert_eq!(obs.cookies.tracking_count, 0);
        assert_eq!(obs.scripts.tracking_count, 0);
        assert_eq!(obs.resources.tracking_count, 0);
        assert!(obs.headers.checks.is_empty());
        assert!(reports[0].detected_services().is_empty());
    }

    #[test]
    fn default_config_sits_next_to_input() {
        assert_eq!(
            default_config_path(Path::new("pages/home.json")),
            Path::new("pages").join(DEFAULT_CONFIG_FILE)
        );
        assert_eq!(default_config_path(Path::new("home.json")), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(default_config_path(Path::new("-")), PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn renders_every_format() {
        let reports = analyze_fixture("snapshot.json").unwrap();
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Html] {
            let out = render_report(&reports[0], format).unwrap();
            assert!(!out.is_empty());
        }
    }
}
