//! Candidate extraction and the parameter-name predicate.
//!
//! Two stages: a broad regex carves identifier-shaped runs out of arbitrary
//! text, then a stricter shape + length check drops noise such as hashes,
//! long utility class names and minified identifiers.

use regex::Regex;
use std::sync::OnceLock;

/// Longest token accepted as a parameter name.
pub const MAX_TOKEN_LEN: usize = 15;

fn candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9_]*").expect("valid regex"))
}

fn shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z]+(_[a-zA-Z0-9]+){0,2}$").expect("valid regex"))
}

/// Pull every identifier-shaped substring out of `text`.
///
/// `btn-submit_2` yields `btn` and `submit_2`.
pub fn extract_candidates(text: &str) -> impl Iterator<Item = &str> {
    candidate_regex().find_iter(text).map(|m| m.as_str())
}

/// Whether `candidate` looks like a request parameter name.
///
/// At most 15 characters, letters first, then up to two `_alnum` suffix
/// segments. `user_id_2` passes, `user_id_2_extra` does not.
pub fn is_parameter_name(candidate: &str) -> bool {
    candidate.len() <= MAX_TOKEN_LEN && shape_regex().is_match(candidate)
}

/// Keep the candidates that pass [`is_parameter_name`].
pub fn filter_candidates<'a, I>(candidates: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = &'a str> + 'a,
    I::IntoIter: 'a,
{
    candidates
        .into_iter()
        .filter(|c| is_parameter_name(c))
        .map(str::to_string)
}

/// Extract then filter in one pass.
pub fn parameter_tokens(text: &str) -> Vec<String> {
    filter_candidates(extract_candidates(text)).collect()
}
