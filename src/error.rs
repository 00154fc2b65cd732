// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for remediabot
//!
//! `RemediaError` covers the I/O edges of the crate (config files, finding
//! lists, scan reports). The per-finding errors below never abort a
//! remediation pass: the driver records them as diagnostics and moves on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemediaError>;

#[derive(Error, Debug)]
pub enum RemediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan report error: {0}")]
    Ingest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A finding's selector could not be turned into a window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("document has no root element")]
    NoRootElement,

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("selector \"{0}\" no longer matches the document")]
    NoMatch(String),
}

/// The text/NLP adapter is unavailable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("text analyzer unavailable: {0}")]
    Unavailable(String),
}

/// A fixer could not apply its heuristic to one window.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixError {
    #[error("invalid {field} color \"{value}\"")]
    InvalidColor { field: &'static str, value: String },

    #[error("window is not an element")]
    NotAnElement,

    #[error("no <body> element under the window")]
    MissingBody,

    #[error("no descriptive text found in attributes")]
    NoDescriptiveText,

    #[error("could not detect a language for the page text")]
    LanguageUndetected,

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
