// src/lib.rs
//! Segmentation engine for regulatory filings.
//!
//! Raw filing text is normalized into a lowercase, single-spaced body trimmed
//! to the administrative header/footer band, then partitioned into a map from
//! section marker (e.g. `item 7.01`) to the text belonging to that section.

pub mod config;
pub mod extractors;
pub mod loader;
pub mod storage;
pub mod utils;

pub use extractors::normalizer::normalize;
pub use extractors::segmenter::segment;
pub use extractors::span::search_span;
