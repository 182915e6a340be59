use crate::scoring::{Priority, RiskLevel, StatusTier};
use crate::AnalysisReport;

const STYLE: &str = r#"
  :root {
    --bg: #0d1117; --fg: #c9d1d9; --border: #30363d; --card: #161b22;
    --muted: #8b949e; --low: #3fb950; --medium: #d29922; --high: #f85149;
    --accent: #58a6ff;
  }
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
    background: var(--bg); color: var(--fg); line-height: 1.5; padding: 2rem; }
  .container { max-width: 720px; margin: 0 auto; }
  header { padding: 1.5rem; background: var(--card); border: 1px solid var(--border);
    border-radius: 8px; margin-bottom: 1.5rem; }
  header h1 { font-size: 1.4rem; }
  header h1 span { color: var(--accent); font-weight: 400; }
  header .url { font-size: 0.85rem; color: var(--muted); word-break: break-all; }
  .score { display: flex; align-items: center; gap: 1.5rem; padding: 1.5rem;
    background: var(--card); border: 1px solid var(--border); border-radius: 8px;
    margin-bottom: 1.5rem; }
  .gauge { width: 120px; height: 120px; border-radius: 50%; display: grid;
    place-items: center; }
  .gauge .inner { width: 96px; height: 96px; border-radius: 50%; background: var(--card);
    display: grid; place-items: center; font-size: 2rem; font-weight: 700; }
  .status { font-size: 1.2rem; font-weight: 700; }
  .status.excellent, .status.good { color: var(--low); }
  .status.moderate { color: var(--medium); }
  .status.poor { color: var(--high); }
  .verdict { display: inline-block; margin-top: 0.5rem; padding: 0.2rem 0.8rem;
    border-radius: 6px; font-weight: 700; }
  .verdict.pass { background: var(--low); color: #000; }
  .verdict.fail { background: var(--high); color: #fff; }
  section { background: var(--card); border: 1px solid var(--border); border-radius: 8px;
    padding: 1rem 1.5rem; margin-bottom: 1.5rem; }
  section h2 { font-size: 0.85rem; text-transform: uppercase; color: var(--muted);
    margin-bottom: 0.75rem; }
  .risk-item { display: flex; justify-content: space-between; padding: 0.4rem 0;
    border-bottom: 1px solid var(--border); }
  .risk-item:last-child { border-bottom: none; }
  .level { font-size: 0.75rem; font-weight: 700; padding: 0.1rem 0.5rem; border-radius: 4px; }
  .level.low { background: var(--low); color: #000; }
  .level.medium { background: var(--medium); color: #000; }
  .level.high { background: var(--high); color: #fff; }
  ul { margin-left: 1.25rem; }
  li { margin-bottom: 0.4rem; }
  li.high { color: var(--high); }
  li.medium { color: var(--medium); }
  li.low { color: var(--low); }
  table { width: 100%; border-collapse: collapse; }
  th { text-align: left; padding: 0.5rem; border-bottom: 2px solid var(--border);
    font-size: 0.8rem; text-transform: uppercase; color: var(--muted); }
  td { padding: 0.5rem; border-bottom: 1px solid var(--border); font-size: 0.9rem; }
  footer { text-align: center; font-size: 0.8rem; color: var(--muted); }
"#;

/// Render a report as a self-contained HTML page.
pub fn render(report: &AnalysisReport) -> String {
    let obs = &report.observation;
    let result = &report.result;
    let tier = result.status_tier();
    let badge = report.badge();

    let risk_items: String = result
        .risk_by_category
        .iter()
        .map(|(category, level)| {
            format!(
                r#"<div class="risk-item"><span>{name} ({count})</span><span class="level {class}">{label}</span></div>"#,
                name = category,
                count = category.measure(obs),
                class = level_class(level),
                label = level_class(level).to_uppercase(),
            )
        })
        .collect();

    let recommendations: String = result
        .recommendations
        .iter()
        .map(|r| {
            format!(
                r#"<li class="{class}">{text}</li>"#,
                class = priority_class(r.priority),
                text = html_escape(&r.text),
            )
        })
        .collect();

    let fingerprinting = if obs.fingerprinting.any() {
        html_escape(&obs.fingerprinting.techniques().join(", "))
    } else {
        "None detected".to_string()
    };

    let resources_section = if obs.resources.items.is_empty() {
        String::new()
    } else {
        let items: String = obs
            .resources
            .items
            .iter()
            .take(10)
            .map(|r| {
                format!(
                    "<li><code>&lt;{}&gt;</code> {} <code>{}</code></li>",
                    r.element,
                    html_escape(&r.marker),
                    html_escape(&r.source_url)
                )
            })
            .collect();
        format!(
            "<section><h2>Tracking resources ({} of {})</h2><ul>{items}</ul></section>",
            obs.resources.tracking_count, obs.resources.count
        )
    };

    let headers_section = if obs.headers.inspected {
        let checks: String = obs
            .headers
            .checks
            .iter()
            .map(|c| {
                let (class, label) = match (c.present, c.secure) {
                    (_, true) => ("low", "OK"),
                    (true, false) => ("medium", "WEAK"),
                    (false, false) => ("high", "MISSING"),
                };
                format!(
                    r#"<div class="risk-item"><span>{}</span><span class="level {class}">{label}</span></div>"#,
                    html_escape(&c.label)
                )
            })
            .collect();
        let exposures: String = obs
            .headers
            .exposures
            .iter()
            .map(|e| {
                format!(
                    "<li>{}: <code>{}</code></li>",
                    html_escape(&e.description),
                    html_escape(&e.value)
                )
            })
            .collect();
        let exposures = if exposures.is_empty() {
            exposures
        } else {
            format!("<ul>{exposures}</ul>")
        };
        format!("<section><h2>Security headers</h2>{checks}{exposures}</section>")
    } else {
        String::new()
    };

    let services: String = report
        .detected_services()
        .iter()
        .take(5)
        .map(|(service, domain)| {
            format!(
                "<li>{} <code>{}</code></li>",
                html_escape(service),
                html_escape(domain)
            )
        })
        .collect();
    let services_section = if services.is_empty() {
        String::new()
    } else {
        format!("<section><h2>Detected services</h2><ul>{services}</ul></section>")
    };

    let (verdict_class, verdict_text) = verdict_parts(report);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>PrivacyLens Report: {domain}</title>
<style>{style}</style>
</head>
<body>
<div class="container">
  <header>
    <h1>PrivacyLens <span>{domain}</span></h1>
    <div class="url">{url}</div>
  </header>

  <div class="score">
    <div class="gauge" style="background: conic-gradient({color} {score}%, var(--border) 0);">
      <div class="inner">{score}</div>
    </div>
    <div>
      <div class="status {tier_class}">{tier_label}</div>
      <div class="verdict {verdict_class}">{verdict_text}</div>
    </div>
  </div>

  <section>
    <h2>Risk breakdown</h2>
    {risk_items}
  </section>

  <section>
    <h2>Fingerprinting</h2>
    <p>{fingerprinting}</p>
  </section>

  {services_section}

  {resources_section}

  {headers_section}

  <section>
    <h2>Recommendations</h2>
    <ul>{recommendations}</ul>
  </section>

  <footer>Generated by PrivacyLens {version}, fail below {fail_below}</footer>
</div>
</body>
</html>"##,
        domain = html_escape(report.page_label()),
        url = html_escape(&obs.page_url),
        style = STYLE,
        color = badge.color.hex(),
        score = result.score,
        tier_class = tier_class(tier),
        tier_label = tier.label(),
        verdict_class = verdict_class,
        verdict_text = verdict_text,
        risk_items = risk_items,
        fingerprinting = fingerprinting,
        services_section = services_section,
        resources_section = resources_section,
        headers_section = headers_section,
        recommendations = recommendations,
        version = env!("CARGO_PKG_VERSION"),
        fail_below = report.verdict.fail_below,
    )
}

/// Render a table of several reports.
pub fn render_summary(reports: &[AnalysisReport]) -> String {
    let rows: String = reports
        .iter()
        .map(|r| {
            let tier = r.result.status_tier();
            let (verdict_class, verdict_text) = verdict_parts(r);
            format!(
                r#"<tr><td>{domain}</td><td>{score}</td><td class="status {tier_class}">{tier_label}</td><td><span class="level {risk}">{risk_label}</span></td><td><span class="verdict {verdict_class}">{verdict_text}</span></td></tr>"#,
                domain = html_escape(r.page_label()),
                score = r.result.score,
                tier_class = tier_class(tier),
                tier_label = tier.label(),
                risk = level_class(r.result.risk_by_category.highest()),
                risk_label = level_class(r.result.risk_by_category.highest()).to_uppercase(),
                verdict_class = verdict_class,
                verdict_text = verdict_text,
            )
        })
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>PrivacyLens Summary</title>
<style>{style}</style>
</head>
<body>
<div class="container">
  <header><h1>PrivacyLens <span>{count} page(s)</span></h1></header>
  <section>
    <table>
      <thead><tr><th>Page</th><th>Score</th><th>Status</th><th>Highest risk</th><th>Result</th></tr></thead>
      <tbody>{rows}</tbody>
    </table>
  </section>
  <footer>Generated by PrivacyLens {version}</footer>
</div>
</body>
</html>"##,
        style = STYLE,
        count = reports.len(),
        rows = rows,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn verdict_parts(report: &AnalysisReport) -> (&'static str, &'static str) {
    if report.verdict.pass {
        ("pass", "PASS")
    } else {
        ("fail", "FAIL")
    }
}

fn level_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "low",
        RiskLevel::Medium => "medium",
        RiskLevel::High => "high",
    }
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn tier_class(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Excellent => "excellent",
        StatusTier::Good => "good",
        StatusTier::Moderate => "moderate",
        StatusTier::Poor => "poor",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
