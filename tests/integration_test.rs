// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for remediabot

use remediabot::config::{load_config, Config};
use remediabot::finding::{findings_from_json, kinds};
use remediabot::nlp::HeuristicAnalyzer;
use remediabot::report::{generate_report, OutputFormat};
use remediabot::{wave, Document, Finding, RemediationReport, Remediator, Status};
use std::sync::Arc;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).expect("fixture should exist")
}

fn remediator(config: &Config) -> Remediator {
    Remediator::from_config(config, Arc::new(HeuristicAnalyzer::new()))
}

fn fixture_findings() -> Vec<Finding> {
    findings_from_json(&fixture("findings.json")).expect("findings should parse")
}

fn run(config: &Config, findings: &[Finding]) -> RemediationReport {
    remediator(config).remediate_html(findings, &fixture("page.html"))
}

fn element_attr(html: &str, selector: &str, attr: &str) -> Option<String> {
    let doc = Document::parse(html);
    let id = doc.select_first(selector).expect("valid selector")?;
    doc.attr(id, attr).map(str::to_string)
}

#[test]
fn test_remediate_fixture_page() {
    let report = run(&Config::default(), &fixture_findings());
    let statuses: Vec<Status> = report.outcomes.iter().map(|o| o.status).collect();

    assert_eq!(
        statuses,
        vec![
            Status::Applied,
            Status::Applied,
            Status::Applied,
            Status::Applied,
            Status::Applied,
            Status::Applied,
            Status::Applied,
            Status::Skipped,
            Status::Unresolved,
        ]
    );

    let html = &report.html;
    assert_eq!(
        element_attr(html, "p.lead", "style").as_deref(),
        Some("margin: 0; color: hsl(0 0% 16%) !important;")
    );
    assert_eq!(
        element_attr(html, "div#nav > a:nth-of-type(2)", "title").as_deref(),
        Some("page button")
    );
    assert_eq!(
        element_attr(html, "div#nav > a:nth-of-type(1)", "title").as_deref(),
        Some("home link house")
    );
    assert_eq!(
        element_attr(html, "span.fine", "style").as_deref(),
        Some("font-size: 12pt !important;")
    );
    assert_eq!(element_attr(html, "table#layout", "role").as_deref(), Some("presentation"));
    assert_eq!(element_attr(html, "button", "title").as_deref(), Some("icon search"));
    assert_eq!(element_attr(html, "html", "lang").as_deref(), Some("en"));
}

#[test]
fn test_untouched_markup_survives() {
    let report = run(&Config::default(), &fixture_findings());
    assert!(report.html.starts_with("<!DOCTYPE html><html lang=\"en\"><head><title>Corner Store</title></head>"));
    assert!(report.html.contains("<img src=\"/img/house.svg\" alt=\"\">"));
    assert!(report.html.contains("<td>Left column</td>"));
}

#[test]
fn test_disabled_fixer_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(&path, "fixers:\n  disabled: [contrast, table_layout]\n").unwrap();
    let config = load_config(&path).unwrap();

    let report = run(&config, &fixture_findings());
    assert_eq!(report.outcomes[0].status, Status::Skipped);
    assert_eq!(report.outcomes[0].fixer.as_deref(), Some("default"));
    assert_eq!(report.outcomes[4].status, Status::Skipped);
    assert_eq!(element_attr(&report.html, "p.lead", "style").as_deref(), Some("margin: 0"));
    assert_eq!(element_attr(&report.html, "table#layout", "role"), None);
}

#[test]
fn test_wave_report_drives_remediation() {
    let findings = wave::findings_from_str(&fixture("wave_report.json")).expect("report should parse");
    let types: Vec<&str> = findings.iter().map(|f| f.kind.as_str()).collect();
    assert_eq!(
        types,
        vec![
            kinds::CONTRAST,
            kinds::LINK_EMPTY,
            kinds::LANGUAGE_MISSING,
            kinds::TABLE_LAYOUT,
            kinds::TEXT_SMALL,
        ]
    );

    let report = run(&Config::default(), &findings);
    assert!(report.is_clean(), "{}", generate_report(&report, OutputFormat::Text));
    assert_eq!(element_attr(&report.html, "html", "lang").as_deref(), Some("en"));
    assert_eq!(
        element_attr(&report.html, "div#nav > a:nth-of-type(1)", "title").as_deref(),
        Some("home link house")
    );
    assert_eq!(element_attr(&report.html, "table#layout", "role").as_deref(), Some("presentation"));
}

#[test]
fn test_rerun_is_not_idempotent_for_styles() {
    let findings = vec![Finding::new(kinds::TEXT_SMALL, remediabot::Level::Alert).with_selector("span.fine")];
    let first = run(&Config::default(), &findings);
    let second = remediator(&Config::default()).remediate_html(&findings, &first.html);

    assert_eq!(
        element_attr(&second.html, "span.fine", "style").as_deref(),
        Some("font-size: 12pt !important; font-size: 12pt !important;")
    );
}

#[test]
fn test_reports_render() {
    let report = run(&Config::default(), &fixture_findings());

    let text = generate_report(&report, OutputFormat::Text);
    assert!(text.contains("7 applied, 1 skipped, 1 unresolved, 0 failed"));
    assert!(text.contains("SOME FINDINGS NOT REMEDIATED"));

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&report, OutputFormat::Json)).expect("valid JSON");
    assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["outcomes"][8]["status"], "unresolved");
}
