use proptest::prelude::*;
use roster_common::{digits_only, normalize_digits, normalize_text};

proptest! {
    #[test]
    fn normalize_text_is_idempotent(raw in "[ \t۰-۹٠-٩0-9a-zA-Zيكیکعلی\\.\\-]{0,24}") {
        let once = normalize_text(&raw);
        let twice = once.as_deref().and_then(normalize_text);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_digits_is_idempotent(raw in "[۰-۹٠-٩0-9 /:]{0,16}") {
        let once = normalize_digits(&raw);
        prop_assert_eq!(normalize_digits(&once), once.clone());
        prop_assert!(once.chars().all(|ch| ch.is_ascii()));
    }

    #[test]
    fn digits_only_yields_ascii_digits(raw in "\\PC{0,20}") {
        prop_assert!(digits_only(&raw).chars().all(|ch| ch.is_ascii_digit()));
    }
}

#[test]
fn normalized_text_never_empty() {
    for raw in ["", " ", "\t\n", "nan", "NONE"] {
        assert_eq!(normalize_text(raw), None, "{raw:?}");
    }
}
