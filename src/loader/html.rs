// src/loader/html.rs
use once_cell::sync::Lazy;
use scraper::{node::Node, Html, Selector};

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to compile BODY_SELECTOR"));

// Elements whose boundaries separate words in the rendered filing
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "tr", "td", "th", "li", "table", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
];
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "head", "title"];

/// Flattens an HTML filing into plain text.
///
/// Block elements become line breaks so that "Item 7.01" in one `<td>` and the
/// title in the next do not run together; the normalizer collapses them later.
/// Entities (`&nbsp;`, `&#8220;`) are decoded by the parser, leaving the raw
/// characters for the substitution table.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let mut out = String::with_capacity(html.len() / 2);
    for node in root.descendants() {
        match node.value() {
            Node::Text(text) => {
                if node.ancestors().any(|a| is_skipped(a.value())) {
                    continue;
                }
                // Text trailing a block element starts a new line
                if node.prev_sibling().is_some_and(|s| is_block(s.value())) {
                    out.push('\n');
                }
                out.push_str(&text.text);
            }
            value if is_block(value) => out.push('\n'),
            _ => {}
        }
    }
    tracing::debug!("Flattened {} bytes of HTML into {} bytes of text", html.len(), out.len());
    out
}

fn is_block(node: &Node) -> bool {
    matches!(node, Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()))
}

fn is_skipped(node: &Node) -> bool {
    matches!(node, Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::normalizer::Normalizer;

    #[test]
    fn test_table_cells_are_separated() {
        let html = "<html><body><table><tr><td>Item&nbsp;7.01</td><td>Regulation FD</td></tr></table></body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Item\u{a0}7.01\n"), "Cells ran together: {:?}", text);
        assert_eq!(Normalizer::default().canonicalize(&text).trim(), "item 7.01 regulation fd");
    }

    #[test]
    fn test_scripts_and_styles_are_dropped() {
        let html = "<html><head><style>p { color: red; }</style></head>\
                    <body><script>var item = 1;</script><p>Visible</p></body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Visible"));
        assert!(!text.contains("color"));
        assert!(!text.contains("var item"));
    }

    #[test]
    fn test_inline_elements_do_not_split_words() {
        let text = html_to_text("<p>Regu<b>lation</b> FD</p>");
        assert_eq!(text.trim(), "Regulation FD");
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = html_to_text("<p>&#8220;Quoted&#8221;</p>");
        assert_eq!(text.trim(), "\u{201c}Quoted\u{201d}");
    }
}
