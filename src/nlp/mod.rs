// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text analysis adapter used by the title and language fixers.
//!
//! The engine only depends on the [`TextAnalyzer`] contract. The analyzer is
//! built once by the caller and handed to the fixer registry, so tests can
//! swap in a fake with fixed answers.

mod heuristic;

pub use heuristic::HeuristicAnalyzer;

use crate::error::AdapterError;
use serde::Serialize;

/// Coarse part-of-speech classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Classes that carry meaning on their own
    pub fn is_content_word(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun
                | PartOfSpeech::ProperNoun
                | PartOfSpeech::Pronoun
                | PartOfSpeech::Verb
                | PartOfSpeech::Adjective
                | PartOfSpeech::Adverb
        )
    }
}

/// One tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stopword: bool,
    pub is_alpha: bool,
}

/// Result of language detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageGuess {
    /// ISO 639-1 code, e.g. "en"
    pub code: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Tokenization, tagging and language detection
pub trait TextAnalyzer: Send + Sync {
    /// Human-readable name of this analyzer
    fn name(&self) -> &str;

    /// Split `text` into tokens and tag each one
    fn tag(&self, text: &str) -> Result<Vec<Token>, AdapterError>;

    /// Guess the natural language of `text`; `None` when nothing is recognizable
    fn detect_language(&self, text: &str) -> Result<Option<LanguageGuess>, AdapterError>;
}
