// src/extractors/span.rs
use std::ops::Range;

use crate::utils::error::SpanError;

/// Byte range strictly between the end of the first `prefix` and the start of
/// the first `suffix`.
///
/// Both anchors are searched from the start of `text`; the suffix search is
/// NOT restricted to positions after the prefix. An empty `suffix` means
/// "run to end of text".
pub fn locate_span(text: &str, prefix: &str, suffix: &str) -> Result<Range<usize>, SpanError> {
    let start = text
        .find(prefix)
        .map(|idx| idx + prefix.len())
        .ok_or_else(|| SpanError::PrefixNotFound(prefix.to_string()))?;

    let end = if suffix.is_empty() {
        text.len()
    } else {
        text.find(suffix)
            .ok_or_else(|| SpanError::SuffixNotFound(suffix.to_string()))?
    };

    if end < start {
        return Err(SpanError::Inverted {
            suffix: suffix.to_string(),
            start,
            end,
        });
    }

    Ok(start..end)
}

/// Text between `prefix` and `suffix`, or `""` when either anchor is missing
/// or the suffix sits before the end of the prefix.
///
/// An empty result is ambiguous with a genuinely empty span; use
/// [`locate_span`] when the distinction matters.
pub fn search_span<'a>(text: &'a str, prefix: &str, suffix: &str) -> &'a str {
    match locate_span(text, prefix, suffix) {
        Ok(range) => &text[range],
        Err(reason) => {
            tracing::trace!("Empty span: {}", reason);
            ""
        }
    }
}
