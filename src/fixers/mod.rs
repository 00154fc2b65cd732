// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation fixers and the registry that dispatches findings to them.
//!
//! Each fixer implements one heuristic for one finding type and mutates a
//! single window of the shared document. Findings whose type has no fixer
//! go to [`DefaultFixer`], which changes nothing.

pub mod contrast;
pub mod font_size;
pub mod language;
pub mod table_layout;
pub mod title;

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::{kinds, Finding};
use crate::nlp::TextAnalyzer;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// What a fixer did to its window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The window was mutated
    Applied(String),
    /// Nothing needed or possible; the window is untouched
    Skipped(String),
}

/// Trait implemented by all fixers
pub trait Fixer: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &str;

    /// Mutate `window` in `doc` to address `finding`
    fn fix(&self, finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError>;
}

/// Fallback for finding types nobody knows how to fix
pub struct DefaultFixer;

impl Fixer for DefaultFixer {
    fn name(&self) -> &str {
        "default"
    }

    fn fix(&self, finding: &Finding, _window: NodeId, _doc: &mut Document) -> Result<FixOutcome, FixError> {
        Ok(FixOutcome::Skipped(format!(
            "no fixer implemented for \"{}\"; window left as is",
            finding.kind
        )))
    }
}

/// Maps finding types to fixers
pub struct FixerRegistry {
    fixers: HashMap<String, Arc<dyn Fixer>>,
    disabled: HashSet<String>,
    default: DefaultFixer,
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl FixerRegistry {
    /// Registry where every finding goes to the default fixer
    pub fn empty() -> Self {
        Self {
            fixers: HashMap::new(),
            disabled: HashSet::new(),
            default: DefaultFixer,
        }
    }

    /// Registry with the built-in fixers configured from `config`
    pub fn with_builtin(config: &Config, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        let mut registry = Self::empty();

        registry.register(
            kinds::CONTRAST,
            Arc::new(contrast::ContrastFixer::new(&config.contrast)),
        );

        let title: Arc<dyn Fixer> = Arc::new(title::EmptyLinkFixer::new(&config.title, Arc::clone(&analyzer)));
        registry.register(kinds::LINK_EMPTY, Arc::clone(&title));
        registry.register(kinds::BUTTON_EMPTY, title);

        registry.register(
            kinds::TEXT_SMALL,
            Arc::new(font_size::FontSizeFixer::new(&config.font_size)),
        );
        registry.register(kinds::TABLE_LAYOUT, Arc::new(table_layout::TableLayoutFixer));
        registry.register(
            kinds::LANGUAGE_MISSING,
            Arc::new(language::LanguageFixer::new(&config.language, analyzer)),
        );

        for kind in &config.fixers.disabled {
            registry.disable(kind);
        }
        registry
    }

    /// Register (or replace) the fixer for a finding type
    pub fn register(&mut self, kind: &str, fixer: Arc<dyn Fixer>) {
        debug!(kind, fixer = fixer.name(), "Registered fixer");
        self.fixers.insert(kind.to_string(), fixer);
    }

    /// Route a finding type to the default fixer
    pub fn disable(&mut self, kind: &str) {
        self.disabled.insert(kind.to_string());
    }

    /// Whether findings of this type reach a real fixer
    pub fn handles(&self, kind: &str) -> bool {
        !self.disabled.contains(kind) && self.fixers.contains_key(kind)
    }

    /// The fixer for a finding type, or the default fixer
    pub fn lookup(&self, kind: &str) -> &dyn Fixer {
        if self.disabled.contains(kind) {
            return &self.default;
        }
        match self.fixers.get(kind) {
            Some(fixer) => fixer.as_ref(),
            None => &self.default,
        }
    }

    /// Registered finding types, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.fixers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}
