/*!
 * Plain-text extraction from rich-text trees.
 *
 * Lossy and one-way: meant for meta descriptions and card excerpts, never
 * for anything that has to keep structure.
 */

use super::model::{BlockNode, InlineNode, RichTextTree};

/// Appended to truncated excerpts
pub const ELLIPSIS: char = '…';

/// Direct text of paragraph-like blocks, blocks joined by one space
///
/// Returns `fallback` when nothing remains.
pub fn extract_text(tree: &RichTextTree, fallback: &str) -> String {
    let segments: Vec<String> = tree
        .blocks
        .iter()
        .filter_map(|block| match block {
            BlockNode::Paragraph { children }
            | BlockNode::Heading { children, .. }
            | BlockNode::Unknown { children, .. } => Some(direct_text(children)),
            BlockNode::List { .. } => None,
        })
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return fallback.to_string();
    }
    segments.join(" ")
}

fn direct_text(children: &[InlineNode]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            InlineNode::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Extracted text cut to at most `max_chars` characters
///
/// Cuts at the last word boundary that fits and appends an ellipsis; the
/// ellipsis counts toward the limit.
pub fn excerpt(tree: &RichTextTree, max_chars: usize, fallback: &str) -> String {
    let text = extract_text(tree, fallback);
    truncate_chars(&text, max_chars)
}

/// Truncate on a char boundary, preferring whitespace
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let kept: String = text.chars().take(max_chars - 1).collect();
    let cut = match kept.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &kept[..pos],
        _ => kept.as_str(),
    };

    let mut truncated = cut.trim_end().to_string();
    truncated.push(ELLIPSIS);
    truncated
}
