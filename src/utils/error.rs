// src/utils/error.rs
use thiserror::Error;

/// Why a span search came back empty. Only produced by the diagnostic
/// `locate_span`; `search_span` folds every variant into `""`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    #[error("Prefix not found: {0:?}")]
    PrefixNotFound(String),

    #[error("Suffix not found: {0:?}")]
    SuffixNotFound(String),

    #[error("Suffix {suffix:?} starts at {end}, before span start {start}")]
    Inverted {
        suffix: String,
        start: usize,
        end: usize,
    },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid section marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown phrase set: {0}")]
    UnknownPhraseSet(String),

    #[error("Unknown boundary phrase list: {0}")]
    UnknownBoundaryPhrases(String),

    #[error("Invalid section marker pattern: {0}")]
    Extract(#[from] ExtractError),
}

// Errors raised while fetching raw filing text
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Request forbidden (check User-Agent and rate limits): {0}")]
    Forbidden(String),

    #[error("Filing not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Loading filing failed: {0}")]
    Load(#[from] LoadError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
