// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for remediation passes.
//!
//! Supports multiple output formats:
//! - Text: human-readable outcomes grouped by status
//! - JSON: structured outcomes for programmatic consumption

use crate::remediate::{RemediationReport, Status};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report for a remediation pass
pub fn generate_report(report: &RemediationReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
    }
}

fn generate_text_report(report: &RemediationReport) -> String {
    let mut output = String::new();

    output.push_str("=== Remediabot Remediation Report ===\n\n");
    output.push_str(&format!(
        "Run {} started {}\n",
        report.run_id,
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if report.outcomes.is_empty() {
        output.push_str("\nNo findings to remediate.\n");
        return output;
    }

    output.push_str(&format!(
        "Processed {} finding(s): {} applied, {} skipped, {} unresolved, {} failed\n\n",
        report.outcomes.len(),
        report.count(Status::Applied),
        report.count(Status::Skipped),
        report.count(Status::Unresolved),
        report.count(Status::Failed),
    ));

    for status in &[Status::Applied, Status::Failed, Status::Unresolved, Status::Skipped] {
        let outcomes = report.with_status(*status);
        if outcomes.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", status, outcomes.len()));

        for outcome in outcomes {
            output.push_str(&format!(
                "#{} [{}] {}\n",
                outcome.index,
                outcome.kind,
                outcome.selector.as_deref().unwrap_or("<document>")
            ));
            if let Some(ref fixer) = outcome.fixer {
                output.push_str(&format!("  Fixer: {}\n", fixer));
            }
            if !outcome.detail.is_empty() {
                output.push_str(&format!("  Detail: {}\n", outcome.detail));
            }
        }
        output.push('\n');
    }

    if report.is_clean() {
        output.push_str("RESULT: ALL FINDINGS HANDLED\n");
    } else {
        output.push_str("RESULT: SOME FINDINGS NOT REMEDIATED\n");
    }

    output
}

fn generate_json_report(report: &RemediationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}
