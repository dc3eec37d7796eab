// src/config.rs
//! Engine configuration.
//!
//! Everything the normalizer and segmenter depend on (phrase sets,
//! substitution table, marker pattern, ordering) is fixed at construction
//! time. Values come from built-in defaults, optionally overridden by a JSON
//! file and then by CLI flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extractors::normalizer::{Normalizer, SubstitutionTable};
use crate::extractors::phrases::{BoundaryPhrases, PhraseSet, FILING_BODY};
use crate::extractors::pipeline::FilingPipeline;
use crate::extractors::segmenter::{SectionOrder, Segmenter, SegmenterConfig, DEFAULT_MARKER_PATTERN};
use crate::utils::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the header/footer phrase set, built-in or from `custom_phrase_sets`.
    pub phrase_set: String,
    pub custom_phrase_sets: Vec<PhraseSet>,
    pub substitutions: SubstitutionTable,
    pub marker_pattern: String,
    pub order_by: SectionOrder,
    /// Boundary phrase lists to search inside each section.
    pub boundaries: Vec<String>,
    pub custom_boundaries: Vec<BoundaryPhrases>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            phrase_set: FILING_BODY.to_string(),
            custom_phrase_sets: Vec::new(),
            substitutions: SubstitutionTable::default(),
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
            order_by: SectionOrder::default(),
            boundaries: Vec::new(),
            custom_boundaries: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn resolve_phrase_set(&self) -> Result<PhraseSet, ConfigError> {
        self.custom_phrase_sets
            .iter()
            .find(|set| set.name == self.phrase_set)
            .cloned()
            .or_else(|| PhraseSet::builtin(&self.phrase_set))
            .ok_or_else(|| ConfigError::UnknownPhraseSet(self.phrase_set.clone()))
    }

    pub fn resolve_boundaries(&self) -> Result<Vec<BoundaryPhrases>, ConfigError> {
        self.boundaries
            .iter()
            .map(|name| {
                self.custom_boundaries
                    .iter()
                    .find(|b| &b.name == name)
                    .cloned()
                    .or_else(|| BoundaryPhrases::builtin(name))
                    .ok_or_else(|| ConfigError::UnknownBoundaryPhrases(name.clone()))
            })
            .collect()
    }

    pub fn build_pipeline(&self) -> Result<FilingPipeline, ConfigError> {
        let normalizer = Normalizer::new(self.resolve_phrase_set()?, self.substitutions.clone());
        let segmenter = Segmenter::new(SegmenterConfig {
            marker_pattern: self.marker_pattern.clone(),
            order_by: self.order_by,
        })?;
        Ok(FilingPipeline::new(normalizer, segmenter).with_boundaries(self.resolve_boundaries()?))
    }
}
