//! Person name splitting and validation.

use roster_model::{ExclusionReason, ValidationPolicy};

/// First and last name derived from a full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Splits on whitespace: the last token is the last name, everything before
/// it the first name. A single token is a first name with no last name.
pub fn split_full_name(full_name: Option<&str>) -> NameParts {
    let tokens: Vec<&str> = full_name
        .map(|name| name.split_whitespace().collect())
        .unwrap_or_default();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [single] => NameParts {
            first: Some((*single).to_string()),
            last: None,
        },
        [head @ .., tail] => NameParts {
            first: Some(head.join(" ")),
            last: Some((*tail).to_string()),
        },
    }
}

fn long_enough(part: Option<&str>, min_len: usize) -> bool {
    part.is_some_and(|value| value.trim().chars().count() >= min_len)
}

/// Both parts present and each at least `min_len` characters long.
pub fn is_complete_name(first: Option<&str>, last: Option<&str>, min_len: usize) -> bool {
    long_enough(first, min_len) && long_enough(last, min_len)
}

fn is_numeric(part: Option<&str>) -> bool {
    part.is_some_and(|value| !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit()))
}

/// Returns why a name is unacceptable, or `None` when it passes.
///
/// `full_name` is the text checked for marker phrases, Latin letters and
/// punctuation; the length and numeric checks apply to the split parts. A
/// missing part counts as too short.
pub fn name_violation(
    full_name: &str,
    first: Option<&str>,
    last: Option<&str>,
    policy: &ValidationPolicy,
) -> Option<ExclusionReason> {
    let lowered = full_name.to_lowercase();
    if policy
        .anonymous_markers
        .iter()
        .any(|marker| !marker.is_empty() && lowered.contains(&marker.to_lowercase()))
    {
        return Some(ExclusionReason::AnonymousCaller);
    }
    if full_name.chars().any(|ch| ch.is_ascii_alphabetic()) {
        return Some(ExclusionReason::LatinLetters);
    }
    if full_name.contains(['.', '-']) {
        return Some(ExclusionReason::Punctuation);
    }
    if !long_enough(first, policy.min_name_len) || !long_enough(last, policy.min_name_len) {
        return Some(ExclusionReason::NameTooShort);
    }
    if is_numeric(first) || is_numeric(last) {
        return Some(ExclusionReason::NumericName);
    }
    None
}
