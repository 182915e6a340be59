pub mod badge;
pub mod console;
pub mod html;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::AnalysisReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Html,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    /// File extension for saved reports.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Console => "txt",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

/// Render one report in the specified format.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Html => Ok(html::render(report)),
    }
}

/// Render several reports as one summary document.
pub fn render_batch(reports: &[AnalysisReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_summary(reports)),
        OutputFormat::Json => json::render_batch(reports),
        OutputFormat::Html => Ok(html::render_summary(reports)),
    }
}
