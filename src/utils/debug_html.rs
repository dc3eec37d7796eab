// src/utils/debug_html.rs
use std::path::Path;

use crate::extractors::pipeline::FilingPipeline;
use crate::utils::error::AppError;

/// A highlighted byte range of the normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub kind: &'static str,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Renders `text` as an HTML page with each highlight wrapped in a span.
/// Highlights overlapping an earlier one are dropped.
pub fn render_debug_html(text: &str, highlights: &[Highlight]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    html.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    html.push_str(".highlight-marker { background-color: #90EE90; }\n");
    html.push_str(".highlight-boundary { background-color: #ADD8E6; }\n");
    html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|h| (h.start, h.end));

    let mut last_pos = 0;
    for h in sorted {
        if h.start < last_pos || h.end > text.len() {
            continue;
        }
        html.push_str(&escape(&text[last_pos..h.start]));

        let css_class = match h.kind {
            "marker" => "highlight-marker",
            "boundary" => "highlight-boundary",
            _ => "highlight-custom",
        };
        html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, h.start, h.end, h.kind
        ));
        html.push_str(&escape(&text[h.start..h.end]));
        html.push_str("</span>");

        last_pos = h.end;
    }
    html.push_str(&escape(&text[last_pos..]));
    html.push_str("\n</body>\n</html>");
    html
}

/// Every marker match and every boundary start/end phrase occurrence.
pub fn collect_highlights(pipeline: &FilingPipeline, normalized: &str) -> Vec<Highlight> {
    let mut highlights: Vec<Highlight> = pipeline
        .segmenter()
        .marker_regex()
        .find_iter(normalized)
        .map(|m| Highlight { start: m.start(), end: m.end(), kind: "marker" })
        .collect();

    for phrases in pipeline.boundaries() {
        for phrase in phrases.starts.iter().chain(phrases.ends.iter()) {
            for (start, matched) in normalized.match_indices(phrase.as_str()) {
                highlights.push(Highlight { start, end: start + matched.len(), kind: "boundary" });
            }
        }
    }
    highlights
}

/// Writes the annotated normalized text of one filing to `path`.
pub fn write_debug_html<P: AsRef<Path>>(
    pipeline: &FilingPipeline,
    normalized: &str,
    path: P,
) -> Result<(), AppError> {
    let path = path.as_ref();
    let highlights = collect_highlights(pipeline, normalized);
    std::fs::write(path, render_debug_html(normalized, &highlights))?;
    tracing::info!("Saved debug HTML with {} highlights to {}", highlights.len(), path.display());
    Ok(())
}
