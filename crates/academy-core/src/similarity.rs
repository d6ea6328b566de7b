//! Keyword-overlap similarity between a submission and a reference solution.

use std::collections::HashSet;

use crate::normalize::normalize;

/// Tokens this short or shorter are noise (`;`, `=`, `DO`, `TO`) and never
/// count as keywords.
pub const MAX_NOISE_TOKEN_LEN: usize = 2;

/// Distinct keywords of `text` after normalization.
pub fn keywords(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.chars().count() > MAX_NOISE_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Percentage of the reference's keywords that also appear in the submission.
///
/// Recall against the reference: order and repetition are ignored, and extra
/// keywords in the submission never lower the score. Returns 0 when the
/// reference has no keywords.
pub fn similarity(submitted: &str, reference: &str) -> u8 {
    let reference_keywords = keywords(reference);
    if reference_keywords.is_empty() {
        return 0;
    }
    let submitted_keywords = keywords(submitted);
    let matches = submitted_keywords
        .iter()
        .filter(|k| reference_keywords.contains(*k))
        .count();
    percent(matches, reference_keywords.len())
}

/// `round(100 * part / whole)` with halves rounding up. `whole` must be non-zero.
pub(crate) fn percent(part: usize, whole: usize) -> u8 {
    debug_assert!(whole > 0 && part <= whole);
    ((200 * part + whole) / (2 * whole)) as u8
}
