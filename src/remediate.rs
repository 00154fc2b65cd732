// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation driver.
//!
//! Findings are processed strictly in input order against one mutable
//! document. Every finding is resolved against the document as earlier
//! fixers left it, so fix *i* sees the cumulative effect of fixes 1..i-1.
//! A failure on one finding is recorded and the pass moves on.

use crate::config::Config;
use crate::dom::Document;
use crate::finding::{Finding, Level};
use crate::fixers::{FixOutcome, FixerRegistry};
use crate::nlp::TextAnalyzer;
use crate::resolve::SelectorResolver;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What happened to one finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The fixer mutated the document
    Applied,
    /// No change was needed or no fixer exists for the type
    Skipped,
    /// The selector matched nothing in the current document
    Unresolved,
    /// The fixer (or its text analyzer) returned an error
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Applied => write!(f, "applied"),
            Status::Skipped => write!(f, "skipped"),
            Status::Unresolved => write!(f, "unresolved"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one finding
#[derive(Debug, Clone, Serialize)]
pub struct FindingReport {
    /// Position of the finding in the input list
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub level: Level,
    pub selector: Option<String>,
    /// Fixer the finding was dispatched to, if it got that far
    pub fixer: Option<String>,
    pub status: Status,
    /// Human-readable diagnostic
    pub detail: String,
}

/// Outcome of a whole pass
#[derive(Debug, Clone, Serialize)]
pub struct RemediationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<FindingReport>,
    /// The document serialized after the last processed finding
    #[serde(skip)]
    pub html: String,
}

impl RemediationReport {
    /// Outcomes with the given status
    pub fn with_status(&self, status: Status) -> Vec<&FindingReport> {
        self.outcomes.iter().filter(|o| o.status == status).collect()
    }

    pub fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Whether every finding was either fixed or deliberately skipped
    pub fn is_clean(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, Status::Applied | Status::Skipped))
    }
}

/// Resolves findings and dispatches them to fixers
pub struct Remediator {
    registry: FixerRegistry,
    resolver: SelectorResolver,
}

impl Remediator {
    pub fn new(registry: FixerRegistry) -> Self {
        Self {
            registry,
            resolver: SelectorResolver::new(),
        }
    }

    /// Remediator with the built-in fixers
    pub fn from_config(config: &Config, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self::new(FixerRegistry::with_builtin(config, analyzer))
    }

    /// Start a pass over `findings` that edits `doc` one finding per step
    pub fn pass<'a>(&'a self, findings: &'a [Finding], doc: &'a mut Document) -> RemediationPass<'a> {
        let run_id = Uuid::new_v4();
        info!(%run_id, findings = findings.len(), "Starting remediation pass");
        RemediationPass {
            remediator: self,
            findings,
            doc,
            next: 0,
            run_id,
            started_at: Utc::now(),
            outcomes: Vec::with_capacity(findings.len()),
        }
    }

    /// Process every finding against `doc`
    pub fn remediate(&self, findings: &[Finding], doc: &mut Document) -> RemediationReport {
        let mut pass = self.pass(findings, doc);
        while pass.step().is_some() {}
        pass.finish()
    }

    /// Parse `html`, process every finding, and serialize the result
    pub fn remediate_html(&self, findings: &[Finding], html: &str) -> RemediationReport {
        let mut doc = Document::parse(html);
        self.remediate(findings, &mut doc)
    }

    fn process(&self, index: usize, finding: &Finding, doc: &mut Document) -> FindingReport {
        let mut report = FindingReport {
            index,
            kind: finding.kind.clone(),
            level: finding.level,
            selector: finding.selector().map(str::to_string),
            fixer: None,
            status: Status::Skipped,
            detail: String::new(),
        };

        let window = match self.resolver.resolve(finding, doc) {
            Ok(window) => window,
            Err(e) => {
                warn!(finding = %finding.label(), error = %e, "Selector no longer valid, skipping");
                report.status = Status::Unresolved;
                report.detail = e.to_string();
                return report;
            }
        };

        let fixer = self.registry.lookup(&finding.kind);
        report.fixer = Some(fixer.name().to_string());
        debug!(finding = %finding.label(), fixer = fixer.name(), window = %doc.describe(window), "Dispatching");

        match fixer.fix(finding, window, doc) {
            Ok(FixOutcome::Applied(detail)) => {
                info!(finding = %finding.label(), %detail, "Fix applied");
                report.status = Status::Applied;
                report.detail = detail;
            }
            Ok(FixOutcome::Skipped(detail)) => {
                info!(finding = %finding.label(), %detail, "Fix skipped");
                report.detail = detail;
            }
            Err(e) => {
                warn!(finding = %finding.label(), fixer = fixer.name(), error = %e, "Fix failed");
                report.status = Status::Failed;
                report.detail = e.to_string();
            }
        }
        report
    }
}

/// A remediation pass in progress.
///
/// Each [`step`](Self::step) handles exactly one finding, so a caller can
/// stop early and still [`finish`](Self::finish) with the document as it
/// stands.
pub struct RemediationPass<'a> {
    remediator: &'a Remediator,
    findings: &'a [Finding],
    doc: &'a mut Document,
    next: usize,
    run_id: Uuid,
    started_at: DateTime<Utc>,
    outcomes: Vec<FindingReport>,
}

impl RemediationPass<'_> {
    /// Process the next finding; `None` once all findings are done
    pub fn step(&mut self) -> Option<FindingReport> {
        let findings = self.findings;
        let finding = findings.get(self.next)?;
        let report = self.remediator.process(self.next, finding, self.doc);
        self.next += 1;
        self.outcomes.push(report.clone());
        Some(report)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.findings.len()
    }

    /// Findings not processed yet
    pub fn remaining(&self) -> usize {
        self.findings.len().saturating_sub(self.next)
    }

    /// The document as edited so far
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Stop the pass and serialize the document
    pub fn finish(self) -> RemediationReport {
        let report = RemediationReport {
            run_id: self.run_id,
            started_at: self.started_at,
            html: self.doc.to_html(),
            outcomes: self.outcomes,
        };
        info!(
            run_id = %report.run_id,
            applied = report.count(Status::Applied),
            skipped = report.count(Status::Skipped),
            unresolved = report.count(Status::Unresolved),
            failed = report.count(Status::Failed),
            "Remediation pass finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::kinds;
    use crate::nlp::HeuristicAnalyzer;

    fn remediator() -> Remediator {
        Remediator::from_config(&Config::default(), Arc::new(HeuristicAnalyzer::new()))
    }

    fn statuses(report: &RemediationReport) -> Vec<Status> {
        report.outcomes.iter().map(|o| o.status).collect()
    }

    const TABLE_PAGE: &str = "<html><head></head><body><table class=\"grid\"><tbody><tr>\
        <td class=\"cell\">x</td></tr></tbody></table></body></html>";

    fn layout_finding() -> Finding {
        Finding::new(kinds::TABLE_LAYOUT, Level::Alert).with_selector("table.grid > tbody > tr > td")
    }

    fn presentational_cell_finding() -> Finding {
        Finding::contrast("table[role=\"presentation\"] td.cell", 4.48, "#777777", "#ffffff")
    }

    #[test]
    fn test_fixes_see_earlier_fixes() {
        let findings = vec![layout_finding(), presentational_cell_finding()];
        let report = remediator().remediate_html(&findings, TABLE_PAGE);

        assert_eq!(statuses(&report), vec![Status::Applied, Status::Applied]);
        assert_eq!(
            report.html,
            "<html><head></head><body><table class=\"grid\" role=\"presentation\"><tbody><tr>\
             <td class=\"cell\" style=\"color: hsl(0 0% 16%) !important;\">x</td></tr></tbody></table></body></html>"
        );
    }

    #[test]
    fn test_reversed_order_gives_different_result() {
        let findings = vec![presentational_cell_finding(), layout_finding()];
        let report = remediator().remediate_html(&findings, TABLE_PAGE);

        assert_eq!(statuses(&report), vec![Status::Unresolved, Status::Applied]);
        assert_eq!(
            report.html,
            "<html><head></head><body><table class=\"grid\" role=\"presentation\"><tbody><tr>\
             <td class=\"cell\">x</td></tr></tbody></table></body></html>"
        );
    }

    #[test]
    fn test_failing_finding_does_not_abort_batch() {
        let html = "<html><head></head><body><p id=\"a\">a</p><span>b</span><p id=\"c\">c</p></body></html>";
        let findings = vec![
            Finding::contrast("p#a", 4.0, "#777777", "#ffffff"),
            Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("span"),
            Finding::contrast("p#c", 0.0, "not-a-color", "#ffffff"),
            Finding::new(kinds::TEXT_SMALL, Level::Alert).with_selector("li:nth-child(n-9223372036854775808)"),
            Finding::new(kinds::TABLE_LAYOUT, Level::Alert).with_selector("p#c"),
        ];
        let report = remediator().remediate_html(&findings, html);

        assert_eq!(
            statuses(&report),
            vec![
                Status::Applied,
                Status::Applied,
                Status::Failed,
                Status::Unresolved,
                Status::Applied
            ]
        );
        assert_eq!(
            report.html,
            "<html><head></head><body><p id=\"a\" style=\"color: hsl(0 0% 16%) !important;\">a</p>\
             <span style=\"font-size: 12pt !important;\">b</span>\
             <p id=\"c\" role=\"presentation\">c</p></body></html>"
        );
        assert!(report.outcomes[2].detail.contains("not-a-color"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_out_of_range_nth_selector_does_not_stop_batch() {
        let html = "<html><head></head><body><ul><li>one</li></ul><p>a</p></body></html>";
        let findings = vec![
            Finding::new(kinds::TABLE_LAYOUT, Level::Alert).with_selector("li:nth-child(n-9223372036854775808)"),
            Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("p"),
        ];
        let report = remediator().remediate_html(&findings, html);

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[1].status, Status::Applied);
        assert!(report
            .html
            .contains("<p style=\"font-size: 12pt !important;\">a</p>"));
    }

    #[test]
    fn test_stale_selector_is_skipped() {
        let html = "<html><head></head><body><p>a</p></body></html>";
        let findings = vec![
            Finding::new(kinds::LINK_EMPTY, Level::Error).with_selector("nav > a.gone"),
            Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("p"),
        ];
        let report = remediator().remediate_html(&findings, html);

        assert_eq!(statuses(&report), vec![Status::Unresolved, Status::Applied]);
        assert_eq!(report.outcomes[0].fixer, None);
        assert_eq!(
            report.html,
            "<html><head></head><body><p style=\"font-size: 12pt !important;\">a</p></body></html>"
        );
    }

    #[test]
    fn test_unknown_type_skipped_without_change() {
        let html = "<html><head></head><body><img src=\"x.png\"></body></html>";
        let findings = vec![Finding::new("alt_missing", Level::Error).with_selector("img")];
        let report = remediator().remediate_html(&findings, html);

        assert_eq!(statuses(&report), vec![Status::Skipped]);
        assert_eq!(report.outcomes[0].fixer.as_deref(), Some("default"));
        assert_eq!(report.html, html);
        assert!(report.is_clean());
    }

    #[test]
    fn test_step_by_step() {
        let html = "<html><head></head><body><p>a</p><p>b</p></body></html>";
        let findings = vec![
            Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("p:nth-of-type(1)"),
            Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("p:nth-of-type(2)"),
        ];
        let remediator = remediator();
        let mut doc = Document::parse(html);
        let mut pass = remediator.pass(&findings, &mut doc);

        assert_eq!(pass.remaining(), 2);
        let first = pass.step().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.status, Status::Applied);
        assert!(!pass.is_finished());
        let p = pass.document().select_first("p").unwrap().unwrap();
        assert_eq!(pass.document().attr(p, "style"), Some("font-size: 12pt !important;"));

        // Stop early: the second paragraph is left alone
        let report = pass.finish();
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(
            report.html,
            "<html><head></head><body><p style=\"font-size: 12pt !important;\">a</p><p>b</p></body></html>"
        );
    }

    #[test]
    fn test_empty_finding_list() {
        let html = "<html><head></head><body></body></html>";
        let remediator = remediator();
        let mut doc = Document::parse(html);
        let mut pass = remediator.pass(&[], &mut doc);

        assert!(pass.is_finished());
        assert!(pass.step().is_none());
        assert_eq!(pass.finish().html, html);
    }

    #[test]
    fn test_report_serializes_status() {
        let html = "<html><head></head><body><p>a</p></body></html>";
        let findings = vec![Finding::new(kinds::TEXT_SMALL, Level::Alert).with_selector("p")];
        let report = remediator().remediate_html(&findings, html);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcomes"][0]["status"], "applied");
        assert_eq!(value["outcomes"][0]["type"], "text_small");
        assert!(value["run_id"].is_string());
        assert!(value.get("html").is_none());
    }
}
