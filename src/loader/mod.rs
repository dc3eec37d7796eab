// src/loader/mod.rs
//! Getting raw filing text into memory. Nothing here touches the core
//! normalization rules.

pub mod client;
pub mod html;

use std::path::Path;

use crate::utils::error::LoadError;

pub use client::download;
pub use html::html_to_text;

/// Where a raw filing comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingSource {
    Url(String),
    File(String),
}

impl FilingSource {
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            FilingSource::Url(input.to_string())
        } else {
            FilingSource::File(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilingSource::Url(s) | FilingSource::File(s) => s,
        }
    }

    /// File stem or last URL path segment, for naming output directories.
    pub fn default_doc_id(&self) -> String {
        let name = match self {
            FilingSource::File(path) => Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned()),
            FilingSource::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .map(|seg| seg.split('.').next().unwrap_or(seg).to_string()),
        };
        name.filter(|n| !n.is_empty()).unwrap_or_else(|| "filing".to_string())
    }

    /// Guess from the extension whether the filing is HTML.
    pub fn looks_like_html(&self) -> bool {
        let lower = self.as_str().to_lowercase();
        lower.ends_with(".htm") || lower.ends_with(".html")
    }
}

/// Reads a filing from disk. Invalid UTF-8 is replaced rather than rejected.
pub async fn load_file<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    tracing::info!("Reading filing from {}", path.display());
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads raw filing text, flattening HTML when `is_html` is set.
pub async fn load(source: &FilingSource, is_html: bool) -> Result<String, LoadError> {
    let raw = match source {
        FilingSource::Url(url) => download(url).await?,
        FilingSource::File(path) => load_file(path).await?,
    };
    if is_html {
        Ok(html_to_text(&raw))
    } else {
        Ok(raw)
    }
}
