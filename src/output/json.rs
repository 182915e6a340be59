use serde::Serialize;

use crate::error::Result;
use crate::observation::{FingerprintingSignals, HeaderSurface, PageObservation, ResourceSurface};
use crate::output::badge::Badge;
use crate::scoring::policy::PolicyVerdict;
use crate::scoring::{Recommendation, RiskTiers, StatusTier};
use crate::AnalysisReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    page_url: &'a str,
    page_domain: &'a str,
    observed_at: Option<String>,
    score: u8,
    status_tier: StatusTier,
    status_label: &'static str,
    badge: Badge,
    risk_by_category: &'a RiskTiers,
    recommendations: &'a [Recommendation],
    fingerprinting: &'a FingerprintingSignals,
    tracking_resources: &'a ResourceSurface,
    security_headers: &'a HeaderSurface,
    verdict: &'a PolicyVerdict,
    observation: &'a PageObservation,
}

impl<'a> From<&'a AnalysisReport> for JsonReport<'a> {
    fn from(report: &'a AnalysisReport) -> Self {
        let obs = &report.observation;
        let tier = report.result.status_tier();
        Self {
            page_url: &obs.page_url,
            page_domain: &obs.page_domain,
            observed_at: obs.observed_at().map(|t| t.to_rfc3339()),
            score: report.result.score,
            status_tier: tier,
            status_label: tier.label(),
            badge: report.badge(),
            risk_by_category: &report.result.risk_by_category,
            recommendations: &report.result.recommendations,
            fingerprinting: &obs.fingerprinting,
            tracking_resources: &obs.resources,
            security_headers: &obs.headers,
            verdict: &report.verdict,
            observation: obs,
        }
    }
}

/// Render a report as pretty-printed JSON.
pub fn render(report: &AnalysisReport) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonReport::from(report))?;
    Ok(json)
}

/// Render several reports as one JSON array.
pub fn render_batch(reports: &[AnalysisReport]) -> Result<String> {
    let all: Vec<JsonReport<'_>> = reports.iter().map(JsonReport::from).collect();
    let json = serde_json::to_string_pretty(&all)?;
    Ok(json)
}
