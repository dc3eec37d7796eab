// src/extractors/normalizer.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractors::phrases::PhraseSet;
use crate::extractors::span::search_span;

static SPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Failed to compile SPACE_RUN_RE"));

// --- Substitution Table ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: char,
    pub to: String,
}

/// Fixed character replacements applied before space collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionTable(Vec<Substitution>);

impl SubstitutionTable {
    pub fn new(entries: Vec<Substitution>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[Substitution] {
        &self.0
    }

    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.0.iter().find(|s| s.from == c) {
                Some(sub) => out.push_str(&sub.to),
                None => out.push(c),
            }
        }
        out
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        let pairs = [
            ('\u{a0}', " "),  // non-breaking space
            ('\u{93}', "\""), // cp1252 left double quote leaked as a C1 control
            ('\u{201d}', "\""),
            ('\u{201c}', "\""),
        ];
        Self(
            pairs
                .iter()
                .map(|(from, to)| Substitution { from: *from, to: to.to_string() })
                .collect(),
        )
    }
}

// --- Normalizer ---
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    phrases: PhraseSet,
    substitutions: SubstitutionTable,
}

impl Normalizer {
    pub fn new(phrases: PhraseSet, substitutions: SubstitutionTable) -> Self {
        Self { phrases, substitutions }
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Whitespace, substitution, collapsing and case folding without the
    /// header/footer trim.
    pub fn canonicalize(&self, raw: &str) -> String {
        let text = raw.replace(['\n', '\t'], " ");
        let text = self.substitutions.apply(&text);
        let text = SPACE_RUN_RE.replace_all(&text, " ");
        text.to_lowercase()
    }

    /// Canonicalizes `raw` and keeps only the text between the phrase set's
    /// header and footer. Missing header or footer yields an empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let canonical = self.canonicalize(raw);
        let body = search_span(&canonical, &self.phrases.header, &self.phrases.footer);
        if body.is_empty() {
            tracing::debug!(
                "Phrase set '{}' produced an empty body ({} canonical bytes)",
                self.phrases.name,
                canonical.len()
            );
        }
        body.to_string()
    }
}

/// Normalizes with the built-in `filing-body` phrase set and default substitutions.
pub fn normalize(raw: &str) -> String {
    Normalizer::default().normalize(raw)
}
