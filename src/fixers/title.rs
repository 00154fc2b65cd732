// SPDX-License-Identifier: PMPL-1.0-or-later
//! Empty link / empty button fixer - WCAG 2.4.4 Link Purpose, 4.1.2 Name, Role, Value
//!
//! Synthesizes a `title` for an interactive element that has no accessible
//! name, using the words already present in its own and its descendants'
//! attribute values (class names, ids, `alt`, `data-*`, ...).
//!
//! `href` is never harvested: it is a path, not prose. Which words survive
//! is up to the text analyzer, so e.g. "next" is dropped as a stopword.

use super::{FixOutcome, Fixer};
use crate::config::TitleConfig;
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::Finding;
use crate::nlp::{TextAnalyzer, Token};
use regex::Regex;
use scraper::ElementRef;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Underscores, hyphens, slashes and every other non-word character
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\W_]+").expect("valid regex"));

pub struct EmptyLinkFixer {
    analyzer: Arc<dyn TextAnalyzer>,
    excluded_attributes: Vec<String>,
    min_token_len: usize,
}

impl EmptyLinkFixer {
    pub fn new(config: &TitleConfig, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self {
            analyzer,
            excluded_attributes: config.excluded_attributes.clone(),
            min_token_len: config.min_token_len,
        }
    }

    /// Attribute values of the window and its descendants, in document order
    pub fn harvest_attributes(&self, doc: &Document, window: NodeId) -> Vec<String> {
        let Some(element) = doc.element_ref(window) else {
            return Vec::new();
        };
        element
            .descendants()
            .filter_map(ElementRef::wrap)
            .flat_map(|el| el.value().attrs())
            .filter(|(name, _)| {
                !self
                    .excluded_attributes
                    .iter()
                    .any(|excluded| excluded.eq_ignore_ascii_case(name))
            })
            .map(|(_, value)| value.to_string())
            .collect()
    }

    fn keep(&self, token: &Token) -> bool {
        token.is_alpha
            && !token.is_stopword
            && token.pos.is_content_word()
            && token.text.chars().count() > self.min_token_len
    }

    /// Descriptive words for the window, de-duplicated in first-seen order
    pub fn title_words(&self, doc: &Document, window: NodeId) -> Result<Vec<String>, FixError> {
        let mut seen = HashSet::new();
        let mut words = Vec::new();

        for value in self.harvest_attributes(doc, window) {
            let pieces: Vec<&str> = SEPARATOR_RE
                .split(&value)
                .filter(|piece| !piece.is_empty())
                .collect();
            if pieces.is_empty() {
                continue;
            }

            for token in self.analyzer.tag(&pieces.join(" "))? {
                if self.keep(&token) && seen.insert(token.text.clone()) {
                    words.push(token.text);
                }
            }
        }

        Ok(words)
    }
}

impl Fixer for EmptyLinkFixer {
    fn name(&self) -> &str {
        "empty-link-title"
    }

    fn fix(&self, _finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError> {
        if doc.element(window).is_none() {
            return Err(FixError::NotAnElement);
        }

        let words = self.title_words(doc, window)?;
        if words.is_empty() {
            return Err(FixError::NoDescriptiveText);
        }

        let title = words.join(" ");
        debug!(analyzer = self.analyzer.name(), %title, "Synthesized title");
        doc.set_attr(window, "title", &title);
        Ok(FixOutcome::Applied(format!("set title \"{}\"", title)))
    }
}
