// SPDX-License-Identifier: PMPL-1.0-or-later
//! Small text fixer - WCAG 1.4.4 Resize Text

use super::{FixOutcome, Fixer};
use crate::config::FontSizeConfig;
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::Finding;

/// Forces a minimum font size through an `!important` inline declaration
pub struct FontSizeFixer {
    size: String,
}

impl FontSizeFixer {
    pub fn new(config: &FontSizeConfig) -> Self {
        Self {
            size: config.size.clone(),
        }
    }
}

impl Fixer for FontSizeFixer {
    fn name(&self) -> &str {
        "font-size"
    }

    fn fix(&self, _finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError> {
        if !doc.append_style(window, &format!("font-size: {} !important;", self.size)) {
            return Err(FixError::NotAnElement);
        }
        Ok(FixOutcome::Applied(format!("set font-size to {}", self.size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{kinds, Level};

    fn small_text() -> Finding {
        Finding::new(kinds::TEXT_SMALL, Level::Error).with_selector("span")
    }

    #[test]
    fn test_creates_style() {
        let mut doc = Document::parse("<html><head></head><body><span>tiny</span></body></html>");
        let span = doc.select_first("span").unwrap().unwrap();

        FontSizeFixer::new(&FontSizeConfig::default())
            .fix(&small_text(), span, &mut doc)
            .unwrap();
        assert_eq!(
            doc.to_html(),
            "<html><head></head><body><span style=\"font-size: 12pt !important;\">tiny</span></body></html>"
        );
    }

    #[test]
    fn test_appends_to_existing_style() {
        let mut doc = Document::parse(
            "<html><head></head><body><span style=\"font-size: 7px\">tiny</span></body></html>",
        );
        let span = doc.select_first("span").unwrap().unwrap();
        let config = FontSizeConfig { size: "1rem".to_string() };

        FontSizeFixer::new(&config).fix(&small_text(), span, &mut doc).unwrap();
        assert_eq!(
            doc.attr(span, "style"),
            Some("font-size: 7px; font-size: 1rem !important;")
        );
    }

    #[test]
    fn test_document_node_window_rejected() {
        let mut doc = Document::parse("<html><head></head><body><span>tiny</span></body></html>");
        let before = doc.to_html();
        let root = doc.root();

        let err = FontSizeFixer::new(&FontSizeConfig::default())
            .fix(&small_text(), root, &mut doc)
            .unwrap_err();
        assert_eq!(err, FixError::NotAnElement);
        assert_eq!(doc.to_html(), before);
    }
}
