// src/extractors/segmenter.rs

// --- Imports ---
use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::extractors::span::search_span;
use crate::utils::error::ExtractError;

/// `item <digits>.<digits>`, e.g. "item 7.01".
pub const DEFAULT_MARKER_PATTERN: &str = r"item [0-9]+\.[0-9]+";

static DEFAULT_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    compile_marker_pattern(DEFAULT_MARKER_PATTERN).expect("Failed to compile DEFAULT_MARKER_RE")
});

fn compile_marker_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

// --- Ordering Strategy ---
/// How distinct markers are sequenced. The sequence decides both the map
/// order and which marker ends each span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOrder {
    /// Plain string comparison: "item 10.01" sorts before "item 2.01".
    #[default]
    Lexical,
    /// Position of each marker's first occurrence in the text.
    Appearance,
}

impl SectionOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionOrder::Lexical => "lexical",
            SectionOrder::Appearance => "appearance",
        }
    }
}

// --- Section Map ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub marker: String,
    pub text: String,
}

/// Ordered marker -> text mapping. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn get(&self, marker: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.marker == marker)
            .map(|s| s.text.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.marker.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.marker, &section.text)?;
        }
        map.end()
    }
}

// --- Segmenter ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    pub marker_pattern: String,
    pub order_by: SectionOrder,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
            order_by: SectionOrder::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Segmenter {
    marker_re: Regex,
    order_by: SectionOrder,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            marker_re: DEFAULT_MARKER_RE.clone(),
            order_by: SectionOrder::default(),
        }
    }
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, ExtractError> {
        let marker_re = compile_marker_pattern(&config.marker_pattern)?;
        Ok(Self { marker_re, order_by: config.order_by })
    }

    pub fn order_by(&self) -> SectionOrder {
        self.order_by
    }

    pub fn marker_regex(&self) -> &Regex {
        &self.marker_re
    }

    /// Distinct markers in segmentation order, lowercased.
    pub fn markers(&self, normalized: &str) -> Vec<String> {
        match self.order_by {
            SectionOrder::Lexical => {
                let distinct: BTreeSet<String> = self
                    .marker_re
                    .find_iter(normalized)
                    .map(|m| m.as_str().to_lowercase())
                    .collect();
                distinct.into_iter().collect()
            }
            SectionOrder::Appearance => {
                let mut first_seen: HashMap<String, usize> = HashMap::new();
                for m in self.marker_re.find_iter(normalized) {
                    first_seen.entry(m.as_str().to_lowercase()).or_insert(m.start());
                }
                let mut ordered: Vec<(String, usize)> = first_seen.into_iter().collect();
                ordered.sort_by_key(|(_, start)| *start);
                ordered.into_iter().map(|(marker, _)| marker).collect()
            }
        }
    }

    /// Splits `normalized` into per-marker spans.
    ///
    /// Each span runs from its marker to the first occurrence of the *next
    /// marker in the ordered sequence*, not the next marker in the text. With
    /// lexical order and out-of-sequence item numbers this can give empty or
    /// overlapping spans; `SectionOrder::Appearance` avoids that.
    pub fn segment(&self, normalized: &str) -> SectionMap {
        let markers = self.markers(normalized);
        tracing::debug!("Found {} distinct section markers ({} order)", markers.len(), self.order_by.as_str());

        let sections = markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let suffix = markers.get(i + 1).map(String::as_str).unwrap_or("");
                let text = search_span(normalized, marker, suffix);
                if text.is_empty() {
                    tracing::trace!("Section '{}' is empty (next marker '{}')", marker, suffix);
                }
                Section { marker: marker.clone(), text: text.to_string() }
            })
            .collect();

        SectionMap { sections }
    }
}

/// Segments with the default marker pattern in lexical order.
pub fn segment(normalized: &str) -> SectionMap {
    Segmenter::default().segment(normalized)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn appearance_segmenter() -> Segmenter {
        Segmenter::new(SegmenterConfig {
            order_by: SectionOrder::Appearance,
            ..SegmenterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_exact_span_boundaries() {
        let map = segment("... item 1.01 alpha text item 2.01 beta text");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("item 1.01"), Some(" alpha text "));
        assert_eq!(map.get("item 2.01"), Some(" beta text"));
    }

    #[test]
    fn test_lexical_not_numeric_order() {
        let text = "item 2.01 a item 10.01 b item 7.01 c";
        let map = segment(text);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["item 10.01", "item 2.01", "item 7.01"]);
    }

    #[test]
    fn test_no_markers_gives_empty_map() {
        assert!(segment("nothing to see here, item seven").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_duplicate_markers_are_collapsed() {
        let map = segment("item 9.01 exhibits see item 9.01 again item 9.01");
        assert_eq!(map.len(), 1);
        // Last marker runs from its first occurrence to the end
        assert_eq!(map.get("item 9.01"), Some(" exhibits see item 9.01 again item 9.01"));
    }

    #[test]
    fn test_out_of_order_markers_are_carried_forward() {
        // Lexical order is 10.01, 2.01, 7.01 but the text presents 2.01, 7.01, 10.01
        let text = "item 2.01 a item 7.01 b item 10.01 c";
        let map = segment(text);
        // "item 2.01" occurs before the end of "item 10.01": inverted, so empty
        assert_eq!(map.get("item 10.01"), Some(""));
        // Spans 2.01 up to 7.01
        assert_eq!(map.get("item 2.01"), Some(" a "));
        // Last in lexical order, runs to the end and swallows item 10.01
        assert_eq!(map.get("item 7.01"), Some(" b item 10.01 c"));
    }

    #[test]
    fn test_appearance_order() {
        let text = "item 2.01 a item 7.01 b item 10.01 c";
        let map = appearance_segmenter().segment(text);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["item 2.01", "item 7.01", "item 10.01"]);
        assert_eq!(map.get("item 2.01"), Some(" a "));
        assert_eq!(map.get("item 7.01"), Some(" b "));
        assert_eq!(map.get("item 10.01"), Some(" c"));
    }

    #[test]
    fn test_appearance_uses_first_occurrence() {
        let text = "item 5.02 x item 8.01 y item 5.02 z";
        let keys: Vec<String> = appearance_segmenter().markers(text);
        assert_eq!(keys, vec!["item 5.02", "item 8.01"]);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_stored_lowercase() {
        let segmenter = Segmenter::default();
        assert_eq!(segmenter.markers("ITEM 7.01 and Item 8.01"), vec!["item 7.01", "item 8.01"]);
    }

    #[test]
    fn test_marker_requires_dotted_number() {
        let map = segment("item 7 regulation item 7. fd item .01 item 7.01 body");
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["item 7.01"]);
        assert_eq!(map.get("item 7.01"), Some(" body"));
    }

    #[test]
    fn test_custom_marker_pattern() {
        let segmenter = Segmenter::new(SegmenterConfig {
            marker_pattern: r"part [ivx]+".to_string(),
            order_by: SectionOrder::Lexical,
        })
        .unwrap();
        let map = segmenter.segment("part i one part ii two");
        assert_eq!(map.get("part i"), Some(" one "));
        assert_eq!(map.get("part ii"), Some(" two"));
    }

    #[test]
    fn test_invalid_marker_pattern() {
        let result = Segmenter::new(SegmenterConfig {
            marker_pattern: "item (".to_string(),
            order_by: SectionOrder::Lexical,
        });
        assert!(matches!(result, Err(ExtractError::Pattern(_))));
    }

    #[test]
    fn test_section_map_serializes_in_order() {
        let map = segment("item 2.01 b item 1.01 a");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"item 1.01":"","item 2.01":" b item 1.01 a"}"#);
    }
}
