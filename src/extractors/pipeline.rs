// src/extractors/pipeline.rs
use serde::Serialize;

use crate::extractors::boundaries::extract_block;
use crate::extractors::normalizer::Normalizer;
use crate::extractors::phrases::BoundaryPhrases;
use crate::extractors::segmenter::{SectionMap, Segmenter};

/// A boundary block found inside one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockMatch {
    pub section: String,
    pub phrases: String,
    pub text: String,
}

/// Everything derived from one raw filing.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentedFiling {
    pub doc_id: String,
    pub source: String,
    pub phrase_set: String,
    pub order_by: String,
    #[serde(skip)]
    pub normalized: String,
    pub sections: SectionMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockMatch>,
}

/// Raw text -> normalized text -> section map. Holds no per-document state,
/// so one pipeline can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FilingPipeline {
    normalizer: Normalizer,
    segmenter: Segmenter,
    boundaries: Vec<BoundaryPhrases>,
}

impl FilingPipeline {
    pub fn new(normalizer: Normalizer, segmenter: Segmenter) -> Self {
        Self { normalizer, segmenter, boundaries: Vec::new() }
    }

    /// Also search every section for these boundary blocks.
    pub fn with_boundaries(mut self, boundaries: Vec<BoundaryPhrases>) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn boundaries(&self) -> &[BoundaryPhrases] {
        &self.boundaries
    }

    pub fn sections(&self, raw: &str) -> SectionMap {
        self.segmenter.segment(&self.normalizer.normalize(raw))
    }

    pub fn process(&self, doc_id: &str, source: &str, raw: &str) -> SegmentedFiling {
        let normalized = self.normalizer.normalize(raw);
        if normalized.is_empty() {
            tracing::warn!(
                "Filing {} has an empty body; header or footer phrase of '{}' not found",
                doc_id,
                self.normalizer.phrases().name
            );
        }

        let sections = self.segmenter.segment(&normalized);
        let blocks = self.find_blocks(&sections);
        tracing::info!(
            "Segmented filing {}: {} sections, {} boundary blocks",
            doc_id,
            sections.len(),
            blocks.len()
        );

        SegmentedFiling {
            doc_id: doc_id.to_string(),
            source: source.to_string(),
            phrase_set: self.normalizer.phrases().name.clone(),
            order_by: self.segmenter.order_by().as_str().to_string(),
            normalized,
            sections,
            blocks,
        }
    }

    fn find_blocks(&self, sections: &SectionMap) -> Vec<BlockMatch> {
        let mut blocks = Vec::new();
        for section in sections.iter() {
            for phrases in &self.boundaries {
                let text = extract_block(&section.text, phrases);
                if !text.is_empty() {
                    blocks.push(BlockMatch {
                        section: section.marker.clone(),
                        phrases: phrases.name.clone(),
                        text,
                    });
                }
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::normalizer::SubstitutionTable;
    use crate::extractors::phrases::{PhraseSet, FORWARD_LOOKING_STATEMENTS, VOTE_TALLY};
    use crate::extractors::segmenter::{SectionOrder, SegmenterConfig};

    const FILING: &str = "UNITED STATES SECURITIES AND EXCHANGE COMMISSION\n\
        Financial Accounting Standards provided pursuant to Section 13(a) of the Exchange Act. \u{a0}\n\
        Item 5.07\tSubmission of Matters to a Vote of Security Holders\n\
        Proposal 1: For Against Abstain Broker Non-Votes 1,200 30 4 100\n\
        Item 7.01 Regulation FD Disclosure\n\
        Forward-Looking Statements This current report contains guidance. \
        Undue reliance should not be placed upon the forward-looking statements.\n\
        SIGNATURE\nPursuant to the requirements of the Securities Exchange Act of 1934, ...";

    fn pipeline_with_blocks() -> FilingPipeline {
        FilingPipeline::default().with_boundaries(vec![
            BoundaryPhrases::builtin(FORWARD_LOOKING_STATEMENTS).unwrap(),
            BoundaryPhrases::builtin(VOTE_TALLY).unwrap(),
        ])
    }

    #[test]
    fn test_process_end_to_end() {
        let filing = pipeline_with_blocks().process("0001-test", "inline", FILING);

        let keys: Vec<&str> = filing.sections.keys().collect();
        assert_eq!(keys, vec!["item 5.07", "item 7.01"]);
        assert_eq!(
            filing.sections.get("item 5.07"),
            Some(" submission of matters to a vote of security holders proposal 1: for against abstain broker non-votes 1,200 30 4 100 ")
        );
        assert!(filing.sections.get("item 7.01").unwrap().ends_with("forward-looking statements. "));
        assert_eq!(filing.phrase_set, "filing-body");
        assert_eq!(filing.order_by, "lexical");
    }

    #[test]
    fn test_blocks_are_found_per_section() {
        let filing = pipeline_with_blocks().process("0001-test", "inline", FILING);
        assert_eq!(filing.blocks.len(), 2);

        assert_eq!(filing.blocks[0].section, "item 5.07");
        assert_eq!(filing.blocks[0].phrases, VOTE_TALLY);
        assert_eq!(filing.blocks[0].text, " 1,200 30 4 100 ");

        assert_eq!(filing.blocks[1].section, "item 7.01");
        assert_eq!(filing.blocks[1].phrases, FORWARD_LOOKING_STATEMENTS);
        assert_eq!(filing.blocks[1].text, " contains guidance. ");
    }

    #[test]
    fn test_missing_header_gives_empty_filing() {
        let filing = FilingPipeline::default().process("x", "inline", "Item 7.01 no header here");
        assert!(filing.normalized.is_empty());
        assert!(filing.sections.is_empty());
        assert!(filing.blocks.is_empty());
    }

    #[test]
    fn test_sections_matches_free_functions() {
        let pipeline = FilingPipeline::default();
        let expected = crate::segment(&crate::normalize(FILING));
        assert_eq!(pipeline.sections(FILING), expected);
    }

    #[test]
    fn test_custom_pipeline() {
        let normalizer = Normalizer::new(
            PhraseSet {
                name: "custom".to_string(),
                header: "begin".to_string(),
                footer: "finish".to_string(),
            },
            SubstitutionTable::default(),
        );
        let segmenter = Segmenter::new(SegmenterConfig {
            order_by: SectionOrder::Appearance,
            ..SegmenterConfig::default()
        })
        .unwrap();
        let pipeline = FilingPipeline::new(normalizer, segmenter);

        let filing = pipeline.process("c", "inline", "BEGIN Item 9.01 a Item 10.01 b FINISH");
        let keys: Vec<&str> = filing.sections.keys().collect();
        assert_eq!(keys, vec!["item 9.01", "item 10.01"]);
        assert_eq!(filing.sections.get("item 9.01"), Some(" a "));
        assert_eq!(filing.sections.get("item 10.01"), Some(" b "));
    }

    #[test]
    fn test_pipeline_is_shareable_across_threads() {
        let pipeline = std::sync::Arc::new(FilingPipeline::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = pipeline.clone();
                std::thread::spawn(move || pipeline.sections(FILING).len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}
