//! Parsing user-submitted number lists.
//!
//! Accepts integers separated by commas, whitespace, or both:
//! `"5, 3,8 1"` parses to `[5, 3, 8, 1]`. Rejected submissions never reach
//! the engine.

use crate::error::{SortError, SortResult};

/// Parse a comma/whitespace separated list of signed integers.
///
/// # Errors
///
/// Returns [`SortError::EmptyInput`] when the text holds no tokens and
/// [`SortError::InvalidInput`] for the first token that is not an `i64`.
pub fn parse_sequence(text: &str) -> SortResult<Vec<i64>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i64>().map_err(|_| SortError::InvalidInput {
                token: token.to_string(),
                position,
            })
        })
        .collect::<SortResult<Vec<_>>>()?;

    if values.is_empty() {
        return Err(SortError::EmptyInput);
    }
    Ok(values)
}

/// Format a sequence the way [`parse_sequence`] reads it back.
#[must_use]
pub fn format_sequence(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
