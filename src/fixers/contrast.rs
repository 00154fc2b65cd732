// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast fixer - WCAG 1.4.3 Contrast (Minimum)
//!
//! Moves the foreground lightness away from the background: darker text on
//! light backgrounds, lighter text on dark ones. Hue and saturation are kept,
//! and the new color is appended to the inline style as an `!important`
//! declaration.
//!
//! Applying the fix twice appends a second declaration computed from the
//! finding's colors; the later one wins in the cascade.

use super::{FixOutcome, Fixer};
use crate::color::{contrast_ratio, parse_hex_color, Hsl};
use crate::config::ContrastConfig;
use crate::dom::{Document, NodeId};
use crate::error::FixError;
use crate::finding::Finding;
use tracing::debug;

pub struct ContrastFixer {
    light_background: f64,
    lightness_shift: f64,
}

impl ContrastFixer {
    pub fn new(config: &ContrastConfig) -> Self {
        Self {
            light_background: config.light_background,
            lightness_shift: config.lightness_shift,
        }
    }

    /// Foreground color with its lightness pushed away from the background
    pub fn adjusted_foreground(&self, foreground: Hsl, background: Hsl) -> Hsl {
        let l = if background.l >= self.light_background {
            (foreground.l - self.lightness_shift).max(0.0)
        } else {
            (foreground.l + self.lightness_shift).min(1.0)
        };
        Hsl { l, ..foreground }
    }
}

impl Fixer for ContrastFixer {
    fn name(&self) -> &str {
        "contrast"
    }

    fn fix(&self, finding: &Finding, window: NodeId, doc: &mut Document) -> Result<FixOutcome, FixError> {
        let fg = parse_hex_color(&finding.foreground).ok_or_else(|| FixError::InvalidColor {
            field: "foreground",
            value: finding.foreground.clone(),
        })?;
        let bg = parse_hex_color(&finding.background).ok_or_else(|| FixError::InvalidColor {
            field: "background",
            value: finding.background.clone(),
        })?;

        let adjusted = self.adjusted_foreground(fg.to_hsl(), bg.to_hsl());
        let css = adjusted.to_css();

        debug!(
            before = %format!("{:.2}", contrast_ratio(fg, bg)),
            after = %format!("{:.2}", contrast_ratio(adjusted.to_rgb(), bg)),
            color = %css,
            "Contrast ratio adjusted"
        );

        if !doc.append_style(window, &format!("color: {} !important;", css)) {
            return Err(FixError::NotAnElement);
        }
        Ok(FixOutcome::Applied(format!("set color to {}", css)))
    }
}
