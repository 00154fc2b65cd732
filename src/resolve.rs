// SPDX-License-Identifier: PMPL-1.0-or-later
//! Selector resolution: from a finding to the window a fixer edits.
//!
//! Resolution is repeated against the live document for every finding, so a
//! selector written against the scanned markup may no longer match once
//! earlier fixers have run. That is reported as a [`ResolveError`] and the
//! finding is skipped.

use crate::dom::{Document, NodeId};
use crate::error::ResolveError;
use crate::finding::{kinds, normalize_selector, Finding};
use tracing::debug;

/// Maps findings to nodes of a document
#[derive(Debug, Clone, Default)]
pub struct SelectorResolver;

impl SelectorResolver {
    pub fn new() -> Self {
        Self
    }

    /// The selector text actually queried for a finding, or `None` for the
    /// whole document.
    pub fn effective_selector(&self, finding: &Finding) -> Option<String> {
        let selector = normalize_selector(finding.selector()?.trim());
        if finding.kind == kinds::TABLE_LAYOUT {
            Some(truncate_at_table(&selector).to_string())
        } else {
            Some(selector)
        }
    }

    /// Resolve a finding to a single window
    pub fn resolve(&self, finding: &Finding, doc: &Document) -> Result<NodeId, ResolveError> {
        let Some(selector) = self.effective_selector(finding) else {
            return doc.document_element().ok_or(ResolveError::NoRootElement);
        };

        match doc.select_first(&selector)? {
            Some(id) => {
                debug!(%selector, window = %doc.describe(id), "Resolved selector");
                Ok(id)
            }
            None => Err(ResolveError::NoMatch(selector)),
        }
    }
}

/// Cut a selector after the compound holding its last `table`.
///
/// Layout-table findings point at a cell deep inside the table; the fix
/// belongs on the table itself. Selectors without `table` come back as is.
pub fn truncate_at_table(selector: &str) -> &str {
    let Some(start) = selector.rfind("table") else {
        return selector;
    };
    let end = selector[start..]
        .find(|c: char| c == ' ' || c == '>')
        .map_or(selector.len(), |offset| start + offset);
    selector[..end].trim_end()
}
