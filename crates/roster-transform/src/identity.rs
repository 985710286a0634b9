//! National identity number validation.

use roster_common::digits_only;
use roster_model::IdentityRule;

/// Check-digit weights for the first nine digits.
const CHECKSUM_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Cleans `raw` to its digits and validates them under `rule`.
///
/// Both rules reject a single repeated digit such as `0000000000`.
pub fn clean_identity_number(raw: &str, rule: IdentityRule) -> Option<String> {
    let digits = digits_only(raw);
    if digits.is_empty() || is_repeated_digit(&digits) {
        return None;
    }
    let valid = match rule {
        IdentityRule::Checksum => checksum_valid(&digits),
        IdentityRule::LengthRange => (8..=11).contains(&digits.len()),
    };
    valid.then_some(digits)
}

/// Weighted modulo-11 check over exactly ten ASCII digits.
///
/// With `r` the weighted sum of the first nine digits modulo 11, the tenth
/// digit must equal `r` when `r < 2` and `11 - r` otherwise.
pub fn checksum_valid(digits: &str) -> bool {
    if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    let sum: u32 = values
        .iter()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = sum % 11;
    let check = values[9];
    if remainder < 2 {
        check == remainder
    } else {
        check == 11 - remainder
    }
}

fn is_repeated_digit(digits: &str) -> bool {
    let mut bytes = digits.bytes();
    match bytes.next() {
        Some(first) => bytes.all(|b| b == first),
        None => false,
    }
}
