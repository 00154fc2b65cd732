// SPDX-License-Identifier: PMPL-1.0-or-later
//! Missing page language fixer - WCAG 3.1.1 Language of Page
//!
//! Detects the language of the visible body text and writes it to the
//! `lang` attribute of the root element.

use super::{FixOutcome, Fixer};
use crate::config::LanguageConfig;
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::Finding;
use crate::nlp::TextAnalyzer;
use std::sync::Arc;
use tracing::debug;

pub struct LanguageFixer {
    analyzer: Arc<dyn TextAnalyzer>,
    min_confidence: f64,
}

impl LanguageFixer {
    pub fn new(config: &LanguageConfig, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self {
            analyzer,
            min_confidence: config.min_confidence,
        }
    }

    /// The `<body>` at or below the window
    fn body(doc: &Document, window: NodeId) -> Option<NodeId> {
        match doc.tag_name(window) {
            Some(name) if name.eq_ignore_ascii_case("body") => Some(window),
            _ => doc.find_element(window, "body"),
        }
    }
}

impl Fixer for LanguageFixer {
    fn name(&self) -> &str {
        "language"
    }

    fn fix(&self, _finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError> {
        let root = doc.document_element().ok_or(FixError::NotAnElement)?;
        if let Some(lang) = doc.attr(root, "lang").filter(|l| !l.trim().is_empty()) {
            return Ok(FixOutcome::Skipped(format!("root element already has lang=\"{}\"", lang)));
        }

        let body = Self::body(doc, window).ok_or(FixError::MissingBody)?;
        let text = doc.text_content(body);

        let guess = self
            .analyzer
            .detect_language(&text)?
            .filter(|guess| guess.confidence >= self.min_confidence)
            .ok_or(FixError::LanguageUndetected)?;

        debug!(
            analyzer = self.analyzer.name(),
            lang = %guess.code,
            confidence = guess.confidence,
            "Detected page language"
        );
        doc.set_attr(root, "lang", &guess.code);
        Ok(FixOutcome::Applied(format!("set lang=\"{}\"", guess.code)))
    }
}
