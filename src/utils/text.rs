// src/utils/text.rs

//! Text helpers for the plain-text digest.

use unicode_segmentation::UnicodeSegmentation;

/// Placeholder for empty values.
pub const PLACEHOLDER: &str = "-";

/// Ellipsis appended to truncated values.
const ELLIPSIS: char = '…';

/// Truncate `text` to at most `max` graphemes, ending with an ellipsis when cut.
///
/// Empty input renders as [`PLACEHOLDER`].
pub fn truncate(text: &str, max: usize) -> String {
    if text.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }

    let mut out: String = graphemes[..max.saturating_sub(1)].concat();
    out.push(ELLIPSIS);
    out
}
