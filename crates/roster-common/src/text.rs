//! Script-tolerant text normalization.
//!
//! Every text field goes through [`normalize_text`] before a validator or a
//! lookup table sees it, so Persian and Arabic-Indic digits, Arabic letter
//! variants and irregular spacing never reach the comparison logic.

/// Values that read as "no value" in spreadsheet exports.
const ABSENT_MARKERS: [&str; 2] = ["nan", "none"];

/// Maps a single Persian (`U+06F0..U+06F9`) or Arabic-Indic (`U+0660..U+0669`)
/// digit to its ASCII counterpart.
fn ascii_digit(ch: char) -> Option<char> {
    let offset = match ch {
        '\u{06F0}'..='\u{06F9}' => ch as u32 - 0x06F0,
        '\u{0660}'..='\u{0669}' => ch as u32 - 0x0660,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

fn persian_letter(ch: char) -> char {
    match ch {
        'ي' => 'ی',
        'ك' => 'ک',
        other => other,
    }
}

/// Bidirectional controls and zero-width characters that spreadsheet
/// exports leave around dates.
pub fn is_invisible_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}

/// Replaces every Persian/Arabic-Indic digit with an ASCII digit; nothing else changes.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().map(|ch| ascii_digit(ch).unwrap_or(ch)).collect()
}

/// Returns `true` when `raw` is blank or one of the textual null markers.
pub fn is_absent(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || ABSENT_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Canonical form of a cell's text.
///
/// Digits become ASCII, `ي`/`ك` become `ی`/`ک`, whitespace runs collapse to a
/// single space and the result is trimmed. Blank, `nan` and `none` (any case)
/// normalize to `None`.
///
/// The function is idempotent.
pub fn normalize_text(raw: &str) -> Option<String> {
    if is_absent(raw) {
        return None;
    }
    let mapped: String = raw
        .chars()
        .map(|ch| ascii_digit(ch).unwrap_or_else(|| persian_letter(ch)))
        .collect();
    let collapsed = mapped.split_whitespace().collect::<Vec<_>>().join(" ");
    if is_absent(&collapsed) {
        None
    } else {
        Some(collapsed)
    }
}

/// Lookup-table key: normalized and lowercased.
pub fn lookup_key(raw: &str) -> Option<String> {
    normalize_text(raw).map(|text| text.to_lowercase())
}

/// ASCII digits of `raw` after digit normalization, in order.
pub fn digits_only(raw: &str) -> String {
    raw.chars()
        .map(|ch| ascii_digit(ch).unwrap_or(ch))
        .filter(char::is_ascii_digit)
        .collect()
}

/// Drops bidi and zero-width characters.
pub fn strip_invisible(raw: &str) -> String {
    raw.chars().filter(|ch| !is_invisible_control(*ch)).collect()
}

/// Header comparison key: all whitespace removed, lowercased.
pub fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace() && !is_invisible_control(*ch))
        .map(persian_letter)
        .collect::<String>()
        .to_lowercase()
}
