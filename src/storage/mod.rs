// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::pipeline::SegmentedFiling;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// `<base_dir>/<doc_id>/`, created on demand.
    pub fn filing_dir(&self, filing: &SegmentedFiling) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(sanitize(&filing.doc_id));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the section map (and any boundary blocks) as `sections.json`
    pub fn save_sections(&self, filing: &SegmentedFiling) -> Result<PathBuf, StorageError> {
        let file_path = self.filing_dir(filing)?.join("sections.json");

        let body = serde_json::json!({
            "sections": filing.sections,
            "blocks": filing.blocks,
        });
        let json = serde_json::to_string_pretty(&body)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;
        tracing::info!("Saved {} sections to {}", filing.sections.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the segmentation run as `meta.json`
    pub fn save_metadata(&self, filing: &SegmentedFiling) -> Result<PathBuf, StorageError> {
        let file_path = self.filing_dir(filing)?.join("meta.json");

        let metadata = serde_json::json!({
            "doc_id": filing.doc_id,
            "source": filing.source,
            "phrase_set": filing.phrase_set,
            "order_by": filing.order_by,
            "section_count": filing.sections.len(),
            "markers": filing.sections.keys().collect::<Vec<_>>(),
            "block_count": filing.blocks.len(),
            "normalized_length": filing.normalized.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;
        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Keeps doc ids usable as a single path component.
fn sanitize(doc_id: &str) -> String {
    let cleaned: String = doc_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    match cleaned.trim_matches('.') {
        "" => "filing".to_string(),
        s => s.to_string(),
    }
}
