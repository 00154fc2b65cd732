// SPDX-License-Identifier: PMPL-1.0-or-later
//! Lexicon-based analyzer.
//!
//! Tags English tokens from closed-class word lists plus suffix rules, and
//! detects the page language by counting hits against per-language
//! function-word profiles. Deterministic and dependency-free, which keeps
//! remediation runs reproducible.

use super::{LanguageGuess, PartOfSpeech, TextAnalyzer, Token};
use crate::error::AdapterError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]+").expect("valid regex"));

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Alphabetic}+").expect("valid regex"));

/// English stopwords, including navigation words that read as filler
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyhow", "anyone", "anything", "anywhere", "are", "around", "as", "at", "back", "be",
    "became", "because", "become", "been", "before", "being", "below", "beside", "between",
    "beyond", "both", "bottom", "but", "by", "call", "can", "cannot", "could", "did", "do",
    "does", "doing", "done", "down", "due", "during", "each", "either", "else", "elsewhere",
    "empty", "enough", "even", "ever", "every", "everyone", "everything", "everywhere",
    "few", "first", "for", "former", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "have", "he", "hence", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself",
    "just", "keep", "last", "latter", "least", "less", "made", "make", "many", "may", "me",
    "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "move", "much",
    "must", "my", "myself", "name", "neither", "never", "nevertheless", "next", "no",
    "nobody", "none", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "quite",
    "rather", "really", "regarding", "same", "say", "see", "seem", "seemed", "seems",
    "several", "she", "should", "show", "side", "since", "so", "some", "someone",
    "something", "sometimes", "somewhere", "still", "such", "take", "than", "that", "the",
    "their", "them", "themselves", "then", "there", "therefore", "these", "they", "this",
    "those", "though", "through", "throughout", "thus", "to", "together", "too", "top",
    "toward", "towards", "under", "until", "up", "upon", "us", "used", "using", "various",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "where",
    "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves",
    "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves",
    "someone", "anyone", "everyone", "nobody", "something", "anything", "everything",
    "nothing", "who", "whom", "whose", "whoever",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any",
    "no", "all", "both", "either", "neither", "another", "such", "what", "which",
];

const ADPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "down",
    "during", "for", "from", "in", "inside", "into", "near", "of", "off", "on", "onto",
    "out", "over", "per", "since", "through", "throughout", "to", "toward", "towards",
    "under", "until", "up", "upon", "via", "with", "within", "without",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while",
    "if", "unless", "whether", "than",
];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify", "ate"];
const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

/// Function words per language; hit counts drive detection
const LANGUAGE_PROFILES: &[(&str, &[&str])] = &[
    ("en", &[
        "the", "and", "of", "to", "is", "in", "that", "it", "for", "with", "as", "was",
        "on", "are", "be", "this", "by", "from", "or", "have", "you", "not", "an", "we",
        "they", "which", "will", "has", "can", "our",
    ]),
    ("es", &[
        "el", "la", "de", "que", "y", "en", "los", "las", "del", "se", "por", "un", "una",
        "para", "con", "no", "es", "su", "al", "lo", "como", "más", "pero", "sus", "le",
        "ya", "o", "este", "sí", "porque",
    ]),
    ("fr", &[
        "le", "la", "les", "de", "des", "et", "est", "un", "une", "du", "en", "que", "qui",
        "dans", "pour", "pas", "sur", "au", "avec", "ce", "il", "elle", "sont", "nous",
        "vous", "mais", "ou", "aux", "cette", "être",
    ]),
    ("de", &[
        "der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich", "des", "auf",
        "für", "ist", "im", "dem", "nicht", "ein", "eine", "als", "auch", "es", "an", "werden",
        "aus", "er", "hat", "dass", "sie", "nach",
    ]),
    ("it", &[
        "il", "di", "che", "e", "la", "per", "un", "una", "in", "del", "della", "sono", "non",
        "con", "si", "da", "gli", "le", "nel", "alla", "anche", "come", "più", "questo",
        "ma", "ha", "dei", "delle", "lo", "degli",
    ]),
    ("pt", &[
        "o", "a", "de", "que", "e", "do", "da", "em", "um", "uma", "para", "com", "não",
        "os", "as", "no", "na", "por", "mais", "dos", "das", "se", "ao", "como", "mas",
        "foi", "ele", "são", "pelo", "pela",
    ]),
    ("nl", &[
        "de", "het", "een", "en", "van", "ik", "te", "dat", "die", "in", "is", "niet", "op",
        "aan", "met", "voor", "zijn", "er", "maar", "om", "ook", "als", "bij", "nog", "wordt",
        "naar", "deze", "dit", "wij", "heeft",
    ]),
];

/// Word-list analyzer for English tagging and profile-based language detection
pub struct HeuristicAnalyzer {
    stopwords: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    determiners: HashSet<&'static str>,
    adpositions: HashSet<&'static str>,
    conjunctions: HashSet<&'static str>,
    profiles: Vec<(&'static str, HashSet<&'static str>)>,
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        let set = |words: &[&'static str]| words.iter().copied().collect::<HashSet<_>>();
        Self {
            stopwords: set(STOPWORDS),
            pronouns: set(PRONOUNS),
            determiners: set(DETERMINERS),
            adpositions: set(ADPOSITIONS),
            conjunctions: set(CONJUNCTIONS),
            profiles: LANGUAGE_PROFILES
                .iter()
                .map(|(code, words)| (*code, set(words)))
                .collect(),
        }
    }

    fn part_of_speech(&self, token: &str, position: usize) -> PartOfSpeech {
        if token.chars().all(|c| c.is_numeric()) {
            return PartOfSpeech::Numeral;
        }
        if !token.chars().any(|c| c.is_alphanumeric()) {
            return PartOfSpeech::Punctuation;
        }

        let lower = token.to_lowercase();
        let word = lower.as_str();
        if self.pronouns.contains(word) {
            return PartOfSpeech::Pronoun;
        }
        if self.determiners.contains(word) {
            return PartOfSpeech::Determiner;
        }
        if self.adpositions.contains(word) {
            return PartOfSpeech::Adposition;
        }
        if self.conjunctions.contains(word) {
            return PartOfSpeech::Conjunction;
        }

        let capitalized = token.chars().next().map(char::is_uppercase).unwrap_or(false);
        if capitalized && position > 0 {
            return PartOfSpeech::ProperNoun;
        }
        if word.len() > 4 && word.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if word.len() > 5 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return PartOfSpeech::Verb;
        }
        if word.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return PartOfSpeech::Adjective;
        }
        PartOfSpeech::Noun
    }
}

impl TextAnalyzer for HeuristicAnalyzer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn tag(&self, text: &str) -> Result<Vec<Token>, AdapterError> {
        Ok(TOKEN_RE
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| {
                let token = m.as_str();
                Token {
                    text: token.to_string(),
                    pos: self.part_of_speech(token, position),
                    is_stopword: self.stopwords.contains(token.to_lowercase().as_str()),
                    is_alpha: token.chars().all(char::is_alphabetic),
                }
            })
            .collect())
    }

    fn detect_language(&self, text: &str) -> Result<Option<LanguageGuess>, AdapterError> {
        let mut hits = vec![0usize; self.profiles.len()];
        for word in WORD_RE.find_iter(text) {
            let word = word.as_str().to_lowercase();
            for (count, (_, profile)) in hits.iter_mut().zip(&self.profiles) {
                if profile.contains(word.as_str()) {
                    *count += 1;
                }
            }
        }

        let total: usize = hits.iter().sum();
        let best = hits
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, usize)>, (idx, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((idx, count)),
            });

        Ok(match best {
            Some((idx, count)) if count > 0 => Some(LanguageGuess {
                code: self.profiles[idx].0.to_string(),
                confidence: count as f64 / total as f64,
            }),
            _ => None,
        })
    }
}
