// src/extractors/phrases.rs
//! Anchor phrases as data.
//!
//! Header/footer pairs and boundary phrase lists differ slightly between call
//! sites, so they are looked up by name instead of being baked into the
//! normalizer or the block extractor.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const FILING_BODY: &str = "filing-body";
pub const CLASSIFICATION: &str = "classification";
pub const FORWARD_LOOKING_STATEMENTS: &str = "forward-looking-statements";
pub const VOTE_TALLY: &str = "vote-tally";

const BODY_HEADER: &str =
    "financial accounting standards provided pursuant to section 13(a) of the exchange act";

/// Header/footer pair bounding the administratively meaningful body of a filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSet {
    pub name: String,
    pub header: String,
    pub footer: String,
}

/// Alternative start and end phrases for a block inside a filing.
/// Earlier entries take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPhrases {
    pub name: String,
    pub starts: Vec<String>,
    #[serde(default)]
    pub ends: Vec<String>,
}

static PHRASE_SETS: Lazy<Vec<PhraseSet>> = Lazy::new(|| {
    vec![
        PhraseSet {
            name: FILING_BODY.to_string(),
            header: BODY_HEADER.to_string(),
            footer: "signature pursuant to the requirements of the securities exchange act of 1934"
                .to_string(),
        },
        PhraseSet {
            name: CLASSIFICATION.to_string(),
            header: BODY_HEADER.to_string(),
            footer: "pursuant to the requirements of the securities exchange act of 1934"
                .to_string(),
        },
    ]
});

static BOUNDARY_PHRASES: Lazy<Vec<BoundaryPhrases>> = Lazy::new(|| {
    vec![
        BoundaryPhrases {
            name: FORWARD_LOOKING_STATEMENTS.to_string(),
            starts: to_strings(&[
                "forward-looking statements this current report",
                "forward looking statements certain statements",
                "forward-looking statements this report",
                "forward-looking statements the company makes",
                "forward-looking statements certain of the matters",
                "forward-looking statements this communication",
                "forward-looking statements this document",
            ]),
            ends: to_strings(&[
                "undue reliance should not be placed upon the forward-looking statements",
                "whether as a result of new information, future events or otherwise, except as required by law",
                "whether as a result of new information, future events, or otherwise",
                "conditions or circumstances on which any such statement is based, except as required by applicable law",
            ]),
        },
        BoundaryPhrases {
            name: VOTE_TALLY.to_string(),
            starts: to_strings(&[
                "for against abstain broker non-votes",
                "for against abstain broker non-vote",
                "for against abstention broker non-votes",
                "for against abstention broker non-vote",
                "for against abstentions broker non-votes",
                "for against abstentions broker non-vote",
            ]),
            ends: Vec::new(),
        },
    ]
});

fn to_strings(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

impl PhraseSet {
    pub fn builtin(name: &str) -> Option<PhraseSet> {
        PHRASE_SETS.iter().find(|set| set.name == name).cloned()
    }

    pub fn builtins() -> &'static [PhraseSet] {
        &PHRASE_SETS
    }
}

impl Default for PhraseSet {
    fn default() -> Self {
        PHRASE_SETS[0].clone()
    }
}

impl BoundaryPhrases {
    pub fn builtin(name: &str) -> Option<BoundaryPhrases> {
        BOUNDARY_PHRASES.iter().find(|set| set.name == name).cloned()
    }

    pub fn builtins() -> &'static [BoundaryPhrases] {
        &BOUNDARY_PHRASES
    }
}
