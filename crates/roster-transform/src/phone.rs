//! Mobile number validation.

use roster_common::digits_only;
use roster_model::PhoneRule;

/// Rewrites international prefixes into the domestic `0`-prefixed form.
fn domestic_form(digits: &str) -> String {
    if digits.len() == 12
        && let Some(rest) = digits.strip_prefix("98")
    {
        return format!("0{rest}");
    }
    if digits.len() == 14
        && let Some(rest) = digits.strip_prefix("0098")
    {
        return format!("0{rest}");
    }
    if digits.len() == 10 && digits.starts_with('9') {
        return format!("0{digits}");
    }
    digits.to_string()
}

/// Cleans `raw` to a mobile number or `None`.
///
/// `98` + 10 digits and `0098` + 10 digits become `0` + 10 digits; a bare
/// 10-digit number starting with `9` gains a leading `0`. The strict rule then
/// accepts only `09` + 9 digits; the lenient rule also keeps any 10 or 11
/// digit number.
pub fn clean_phone(raw: &str, rule: PhoneRule) -> Option<String> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return None;
    }
    let candidate = domestic_form(&digits);
    let canonical = candidate.len() == 11 && candidate.starts_with("09");
    let accepted = match rule {
        PhoneRule::Strict => canonical,
        PhoneRule::Lenient => canonical || matches!(candidate.len(), 10 | 11),
    };
    accepted.then_some(candidate)
}
