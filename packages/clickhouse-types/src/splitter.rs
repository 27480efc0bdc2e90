//! Parameter list splitting.
//!
//! ClickHouse type parameters are comma separated, but a parameter may itself be a
//! composite type carrying its own commas (`Map(String, Tuple(Int32, Int64))`).
//! These helpers split only at the top nesting level, or, for flat lists such as
//! the `DateTime64` precision/timezone pair, split everywhere and pad to a fixed arity.

use crate::errors::ArityError;

pub const DEFAULT_SEPARATOR: char = ',';

/// Splits `text` on top-level commas, ignoring commas nested inside parentheses.
///
/// The last segment is always emitted, so the result is never empty:
/// `split_top_level("")` is `[""]`.
pub fn split_top_level(text: &str) -> Vec<&str> {
    split_top_level_on(text, DEFAULT_SEPARATOR)
}

/// Same as [`split_top_level`] with a caller-chosen separator.
///
/// Segments are not trimmed and parenthesis balance is not validated; an
/// unbalanced input only moves where top-level separators are recognised.
pub fn split_top_level_on(text: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth: i64 = 0;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth -= 1;
        } else if c == separator && depth == 0 {
            segments.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    segments.push(&text[start..]);

    segments
}

/// Splits `text` on every comma and right-pads the result with `None` up to `arity`.
///
/// No nesting awareness: only meant for flat parameter lists.
pub fn split_padded(text: &str, arity: usize) -> Result<Vec<Option<&str>>, ArityError> {
    split_padded_on(text, arity, DEFAULT_SEPARATOR)
}

/// Same as [`split_padded`] with a caller-chosen separator.
///
/// More than `arity` segments is an error rather than a silent truncation.
pub fn split_padded_on(
    text: &str,
    arity: usize,
    separator: char,
) -> Result<Vec<Option<&str>>, ArityError> {
    let mut segments: Vec<Option<&str>> = text.split(separator).map(Some).collect();

    if segments.len() > arity {
        return Err(ArityError {
            expected: arity,
            found: segments.len(),
        });
    }
    segments.resize(arity, None);

    Ok(segments)
}

/// Returns true when every `)` closes an earlier `(` and nothing is left open.
pub fn is_balanced(text: &str) -> bool {
    let mut depth: i64 = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
