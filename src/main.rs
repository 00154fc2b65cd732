// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediabot CLI - Automated Accessibility Remediation Bot
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use remediabot::config::{default_config_path, load_config};
use remediabot::finding::{findings_from_json, Finding, Level};
use remediabot::nlp::HeuristicAnalyzer;
use remediabot::report::{generate_report, OutputFormat};
use remediabot::resolve::SelectorResolver;
use remediabot::{wave, Document, Remediator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Automated accessibility remediation bot for gitbot-fleet
#[derive(Parser)]
#[command(name = "remediabot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply fixes for a list of findings to an HTML file
    Fix {
        /// HTML document to remediate
        #[arg(long)]
        html: PathBuf,

        /// Findings (JSON array, or a WAVE response with --wave)
        #[arg(long)]
        findings: PathBuf,

        /// Treat the findings file as a WAVE reporttype=4 response
        #[arg(long)]
        wave: bool,

        /// Configuration file (TOML or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file for the remediated HTML (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format, printed to stderr
        #[arg(long, default_value = "text")]
        report: FormatArg,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Convert a WAVE response into a findings JSON array
    Ingest {
        /// WAVE reporttype=4 JSON response
        report: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Show which element a finding selector resolves to
    Resolve {
        /// HTML document to query
        #[arg(long)]
        html: PathBuf,

        /// Selector as reported by the scan
        #[arg(long)]
        selector: String,

        /// Finding type; table_layout selectors are widened to the table
        #[arg(long = "type", default_value = "unknown")]
        kind: String,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("remediabot=debug")
    } else {
        EnvFilter::new("remediabot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fix { html, findings, wave, config, output, report, verbose } => {
            init_logging(verbose);
            let config_path = config.unwrap_or_else(default_config_path);
            let config = load_config(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;

            let findings = read_findings(&findings, wave)?;
            let markup = std::fs::read_to_string(&html)
                .with_context(|| format!("reading {}", html.display()))?;

            let remediator = Remediator::from_config(&config, Arc::new(HeuristicAnalyzer::new()));
            let result = remediator.remediate_html(&findings, &markup);

            write_output(&result.html, output.as_deref())?;
            eprintln!("{}", generate_report(&result, report.into()));
        }

        Commands::Ingest { report, output, verbose } => {
            init_logging(verbose);
            let findings = read_findings(&report, true)?;
            write_output(&serde_json::to_string_pretty(&findings)?, output.as_deref())?;
        }

        Commands::Resolve { html, selector, kind, verbose } => {
            init_logging(verbose);
            let markup = std::fs::read_to_string(&html)
                .with_context(|| format!("reading {}", html.display()))?;
            let doc = Document::parse(&markup);
            let finding = Finding::new(&kind, Level::Error).with_selector(&selector);
            let resolver = SelectorResolver::new();

            match resolver.resolve(&finding, &doc) {
                Ok(window) => {
                    if let Some(effective) = resolver.effective_selector(&finding) {
                        println!("Selector: {}", effective);
                    }
                    println!("{}", doc.outer_html(window));
                }
                Err(e) => {
                    eprintln!("Unresolved: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn read_findings(path: &Path, wave_format: bool) -> anyhow::Result<Vec<Finding>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let findings = if wave_format {
        wave::findings_from_str(&content)?
    } else {
        findings_from_json(&content)?
    };
    Ok(findings)
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Output written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
