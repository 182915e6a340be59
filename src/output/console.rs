use crate::observation::domain::truncate;
use crate::scoring::{Priority, RiskCategory, RiskLevel};
use crate::AnalysisReport;

const BAR_CELLS: usize = 20;

/// Render a report as plain console text.
pub fn render(report: &AnalysisReport) -> String {
    let obs = &report.observation;
    let result = &report.result;
    let mut output = String::new();

    output.push_str(&format!("\n  PrivacyLens report for {}\n", report.page_label()));
    if !obs.page_url.is_empty() {
        output.push_str(&format!("  URL: {}\n", obs.page_url));
    }
    if let Some(ts) = obs.observed_at() {
        output.push_str(&format!(
            "  Observed: {}\n",
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output.push_str(&format!(
        "\n  Privacy score: {}/100 ({})\n",
        result.score,
        result.status_tier().label()
    ));
    output.push_str(&format!("  [{}] {}%\n", score_bar(result.score), result.score));

    output.push_str("\n  Risk breakdown:\n");
    for (category, level) in result.risk_by_category.iter() {
        let tag = match level {
            RiskLevel::High => "[HIGH]  ",
            RiskLevel::Medium => "[MEDIUM]",
            RiskLevel::Low => "[LOW]   ",
        };
        let detail = match category {
            RiskCategory::Cookies => format!(
                "{} cookies (tracking {}, functional {})",
                obs.cookies.count, obs.cookies.tracking_count, obs.cookies.functional_count
            ),
            RiskCategory::Scripts => format!(
                "{} scripts (tracking {}, analytics {})",
                obs.scripts.count, obs.scripts.tracking_count, obs.scripts.analytics_count
            ),
            RiskCategory::Storage => format!(
                "localStorage {}, sessionStorage {}",
                obs.storage.local_storage_entry_count, obs.storage.session_storage_entry_count
            ),
            RiskCategory::Iframes => format!(
                "{} iframes (third-party {})",
                obs.iframes.count, obs.iframes.third_party_count
            ),
        };
        output.push_str(&format!("    {:<8} {} {}\n", category.to_string(), tag, detail));
    }

    output.push_str(&format!(
        "\n  Fingerprinting: {}\n",
        if obs.fingerprinting.any() {
            obs.fingerprinting.techniques().join(", ")
        } else {
            "none detected".to_string()
        }
    ));

    if obs.resources.tracking_count > 0 {
        output.push_str(&format!(
            "\n  Tracking resources ({} of {}):\n",
            obs.resources.tracking_count, obs.resources.count
        ));
        for item in obs.resources.items.iter().take(5) {
            output.push_str(&format!(
                "    - <{}> {} [{}]\n",
                item.element,
                truncate(&item.source_url, 60),
                item.marker
            ));
        }
    }

    if obs.headers.inspected {
        output.push_str("\n  Security headers:\n");
        let weak: Vec<_> = obs.headers.weak().collect();
        if weak.is_empty() && obs.headers.exposures.is_empty() {
            output.push_str("    all checked headers present and hardened\n");
        }
        for check in weak {
            let state = if check.present { "weak" } else { "missing" };
            output.push_str(&format!("    {:<8} {}\n", state, check.label));
        }
        for exposure in &obs.headers.exposures {
            output.push_str(&format!(
                "    exposed  {}: {} ({})\n",
                exposure.header,
                truncate(&exposure.value, 40),
                exposure.description
            ));
        }
    }

    let services = report.detected_services();
    if !services.is_empty() {
        output.push_str("\n  Detected services:\n");
        for (service, domain) in services.iter().take(5) {
            output.push_str(&format!("    - {} ({})\n", service, truncate(domain, 50)));
        }
    }

    output.push_str("\n  Recommendations:\n");
    for rec in &result.recommendations {
        let tag = match rec.priority {
            Priority::High => "[HIGH]  ",
            Priority::Medium => "[MEDIUM]",
            Priority::Low => "[LOW]   ",
        };
        output.push_str(&format!("    {} {}\n", tag, rec.text));
    }

    let verdict = &report.verdict;
    output.push_str(&format!(
        "\n  Result: {} (score {}, fail below {})\n\n",
        if verdict.pass { "PASS" } else { "FAIL" },
        verdict.score,
        verdict.fail_below,
    ));

    output
}

/// One line per page, for batch runs.
pub fn render_summary(reports: &[AnalysisReport]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n  {} page(s) analyzed:\n\n", reports.len()));
    for (idx, report) in reports.iter().enumerate() {
        output.push_str(&format!(
            "  [{}/{}] {:<40} {:>3}/100 {:<9} {}\n",
            idx + 1,
            reports.len(),
            truncate(report.page_label(), 40),
            report.result.score,
            report.result.status_tier().to_string(),
            if report.verdict.pass { "PASS" } else { "FAIL" },
        ));
    }
    output.push('\n');
    output
}

fn score_bar(score: u8) -> String {
    let filled = (usize::from(score) / 5).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}
