// SPDX-License-Identifier: PMPL-1.0-or-later
//! Layout table fixer - WCAG 1.3.1 Info and Relationships
//!
//! A table used only for visual layout is marked `role="presentation"` so
//! assistive technology stops announcing rows and columns. The resolver
//! has already widened the window to the `<table>` itself.

use super::{FixOutcome, Fixer};
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::Finding;

pub struct TableLayoutFixer;

impl Fixer for TableLayoutFixer {
    fn name(&self) -> &str {
        "table-layout"
    }

    fn fix(&self, _finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError> {
        if !doc.set_attr(window, "role", "presentation") {
            return Err(FixError::NotAnElement);
        }
        Ok(FixOutcome::Applied("set role=\"presentation\"".to_string()))
    }
}
