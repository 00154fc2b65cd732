// SPDX-License-Identifier: PMPL-1.0-or-later
//! Ingestion of WAVE scan responses.
//!
//! Translates a WAVE API response (`reporttype=4`, which carries selectors
//! and contrast data) into normalized [`Finding`]s: contrast items first,
//! then the `error` category, then `alert`. Category and item order of the
//! response is kept.
//!
//! Fetching the response is the caller's business.

use crate::error::{RemediaError, Result};
use crate::finding::{kinds, normalize_selector, Finding, Level};
use serde_json::Value;
use tracing::debug;

/// Parse a WAVE response body
pub fn findings_from_str(json: &str) -> Result<Vec<Finding>> {
    let report: Value = serde_json::from_str(json)?;
    findings_from_report(&report)
}

/// Extract findings from a parsed WAVE response
pub fn findings_from_report(report: &Value) -> Result<Vec<Finding>> {
    check_status(report)?;

    let categories = report
        .get("categories")
        .and_then(Value::as_object)
        .ok_or_else(|| RemediaError::Ingest("response has no categories".to_string()))?;

    let mut findings = Vec::new();
    if let Some(contrast) = categories.get("contrast") {
        findings.extend(contrast_findings(contrast)?);
    }
    for (name, level) in [("error", Level::Error), ("alert", Level::Alert)] {
        if let Some(category) = categories.get(name) {
            findings.extend(category_findings(category, level)?);
        }
    }

    debug!(count = findings.len(), "Ingested scan findings");
    Ok(findings)
}

fn check_status(report: &Value) -> Result<()> {
    let Some(status) = report.get("status") else {
        return Ok(());
    };
    if status.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = status
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("no reason given");
        return Err(RemediaError::Ingest(format!("scan was not successful: {}", reason)));
    }
    Ok(())
}

/// Items of a category; an empty category may be `[]` instead of `{}`
fn items(category: &Value) -> Result<Vec<(&str, &Value)>> {
    match category.get("items") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(a)) if a.is_empty() => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        Some(other) => Err(RemediaError::Ingest(format!("unexpected items value: {}", other))),
    }
}

fn selectors<'a>(item_type: &str, item: &'a Value) -> Result<&'a [Value]> {
    item.get("selectors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| {
            RemediaError::Ingest(format!(
                "item \"{}\" has no selectors (request reporttype=4)",
                item_type
            ))
        })
}

/// `false` or `null` means "no selector"; anything else is normalized
fn selector_text(raw: &Value) -> Result<String> {
    match raw {
        Value::Bool(false) | Value::Null => Ok(String::new()),
        Value::String(s) => Ok(normalize_selector(s)),
        other => Err(RemediaError::Ingest(format!("unexpected selector value: {}", other))),
    }
}

fn contrast_findings(category: &Value) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for (item_type, item) in items(category)? {
        if item_type != kinds::CONTRAST {
            continue;
        }
        let data = item
            .get("contrastdata")
            .and_then(Value::as_array)
            .ok_or_else(|| RemediaError::Ingest("contrast item has no contrastdata".to_string()))?;

        for (raw, entry) in selectors(item_type, item)?.iter().zip(data) {
            let ratio = entry.get(0).and_then(Value::as_f64).unwrap_or(0.0);
            let foreground = entry.get(1).and_then(Value::as_str).unwrap_or("");
            let background = entry.get(2).and_then(Value::as_str).unwrap_or("");
            findings.push(Finding::contrast(
                &selector_text(raw)?,
                ratio,
                foreground,
                background,
            ));
        }
    }
    Ok(findings)
}

fn category_findings(category: &Value, level: Level) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for (item_type, item) in items(category)? {
        for raw in selectors(item_type, item)? {
            findings.push(Finding::new(item_type, level).with_selector(&selector_text(raw)?));
        }
    }
    Ok(findings)
}
