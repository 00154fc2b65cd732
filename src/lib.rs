// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediabot - Automated Accessibility Remediation Bot
//!
//! Part of the gitbot-fleet ecosystem. Remediabot takes the findings of an
//! accessibility scan, each tied to a node of an HTML document by a CSS
//! selector, and applies best-effort fixes to the document in place.
//!
//! Remediation is heuristic. A fix may fail or find its selector stale; that
//! finding is recorded and the rest of the batch still runs.
//!
//! ## Fixers
//!
//! - **Contrast** (1.4.3): Darkens or lightens the text color
//! - **Empty link / button** (2.4.4/4.1.2): Synthesizes a `title` from attribute words
//! - **Small text** (1.4.4): Forces a minimum font size
//! - **Layout table** (1.3.1): Marks the table `role="presentation"`
//! - **Missing language** (3.1.1): Detects and sets the page `lang`

pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod finding;
pub mod fixers;
pub mod nlp;
pub mod remediate;
pub mod report;
pub mod resolve;
pub mod wave;

pub use dom::{Document, NodeId};
pub use error::{RemediaError, Result};
pub use finding::{Finding, Level};
pub use remediate::{RemediationPass, RemediationReport, Remediator, Status};
