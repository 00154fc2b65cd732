// SPDX-License-Identifier: PMPL-1.0-or-later
//! Normalized accessibility findings.
//!
//! A finding names a remediation category, a severity class and a CSS
//! selector locating the offending node. Contrast findings additionally
//! carry the measured ratio and the two hex colors. Findings are produced
//! upstream (see [`crate::wave`]) and are never mutated by the engine.

use serde::{Deserialize, Deserializer, Serialize};

/// Finding type tags with a built-in fixer
pub mod kinds {
    pub const CONTRAST: &str = "contrast";
    pub const LINK_EMPTY: &str = "link_empty";
    pub const BUTTON_EMPTY: &str = "button_empty";
    pub const TEXT_SMALL: &str = "text_small";
    pub const TABLE_LAYOUT: &str = "table_layout";
    pub const LANGUAGE_MISSING: &str = "language_missing";
}

/// Severity class reported by the scan service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Definite accessibility failure
    Error,
    /// Likely problem that needs review
    Alert,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Alert => write!(f, "alert"),
        }
    }
}

/// One accessibility issue to be resolved and possibly remediated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Remediation category tag (e.g. "contrast", "link_empty")
    #[serde(rename = "type")]
    pub kind: String,
    /// Severity class
    pub level: Level,
    /// CSS selector, or `None` for the whole document
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub selector: Option<String>,
    /// Measured contrast ratio (contrast findings only)
    #[serde(default)]
    pub ratio: f64,
    /// Foreground hex color (contrast findings only)
    #[serde(default)]
    pub foreground: String,
    /// Background hex color (contrast findings only)
    #[serde(default)]
    pub background: String,
}

impl Finding {
    /// Create a finding that targets the whole document
    pub fn new(kind: &str, level: Level) -> Self {
        Self {
            kind: kind.to_string(),
            level,
            selector: None,
            ratio: 0.0,
            foreground: String::new(),
            background: String::new(),
        }
    }

    /// Create a contrast finding
    pub fn contrast(selector: &str, ratio: f64, foreground: &str, background: &str) -> Self {
        Self::new(kinds::CONTRAST, Level::Error)
            .with_selector(selector)
            .with_contrast(ratio, foreground, background)
    }

    /// Set the selector; an empty string means the whole document
    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selector = if selector.trim().is_empty() {
            None
        } else {
            Some(selector.to_string())
        };
        self
    }

    /// Set contrast data
    pub fn with_contrast(mut self, ratio: f64, foreground: &str, background: &str) -> Self {
        self.ratio = ratio;
        self.foreground = foreground.to_string();
        self.background = background.to_string();
        self
    }

    /// The selector, if it names anything
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Short label for logs and reports
    pub fn label(&self) -> String {
        match self.selector() {
            Some(sel) => format!("{} @ {}", self.kind, sel),
            None => format!("{} @ <document>", self.kind),
        }
    }
}

/// Bring an upstream selector into the dialect the selector engine matches.
///
/// The scan service upper-cases selectors and emits `first-child`; the text
/// is lower-cased and `first-child` becomes `nth-of-type(1)`.
pub fn normalize_selector(selector: &str) -> String {
    selector.to_lowercase().replace("first-child", "nth-of-type(1)")
}

/// Accepts a string, `false`, or `null` for the selector field.
fn deserialize_selector<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSelector {
        Text(String),
        Flag(bool),
    }

    let raw = Option::<RawSelector>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawSelector::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Parse a JSON array of findings
pub fn findings_from_json(json: &str) -> crate::error::Result<Vec<Finding>> {
    Ok(serde_json::from_str(json)?)
}
