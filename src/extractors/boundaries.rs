// src/extractors/boundaries.rs
use crate::extractors::phrases::BoundaryPhrases;
use crate::extractors::span::search_span;

/// First phrase in list order that occurs anywhere in `text`.
fn first_present<'p>(text: &str, phrases: &'p [String]) -> Option<&'p str> {
    phrases
        .iter()
        .map(String::as_str)
        .find(|phrase| text.contains(phrase))
}

/// Extracts the block opened by one of `phrases.starts` and closed by one of
/// `phrases.ends`.
///
/// The start phrase is chosen by list precedence, not by position. Without a
/// matching start the result is `""`; without a matching end (or with no end
/// phrases at all) the block runs to the end of `text`.
pub fn extract_block(text: &str, phrases: &BoundaryPhrases) -> String {
    let Some(start) = first_present(text, &phrases.starts) else {
        tracing::trace!("No '{}' start phrase present", phrases.name);
        return String::new();
    };
    let end = first_present(text, &phrases.ends).unwrap_or("");
    tracing::trace!("'{}' block: start {:?}, end {:?}", phrases.name, start, end);
    search_span(text, start, end).to_string()
}
