// src/extractors/mod.rs
pub mod boundaries;
pub mod normalizer;
pub mod phrases;
pub mod pipeline;
pub mod segmenter;
pub mod span;

// Re-export key extraction types for convenience
pub use boundaries::extract_block;
pub use normalizer::{Normalizer, Substitution, SubstitutionTable};
pub use phrases::{BoundaryPhrases, PhraseSet};
pub use pipeline::{BlockMatch, FilingPipeline, SegmentedFiling};
pub use segmenter::{Section, SectionMap, SectionOrder, Segmenter, SegmenterConfig};
pub use span::{locate_span, search_span};
