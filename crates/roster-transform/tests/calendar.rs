//! Calendar conversion properties.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use roster_transform::{
    JalaliDate, gregorian_to_jalali, is_valid_jalali, jalali_month_length, jalali_to_gregorian,
    parse_visit_text,
};

fn valid_jalali() -> impl Strategy<Value = (i32, u32, u32)> {
    (1300i32..=1500, 1u32..=12).prop_flat_map(|(year, month)| {
        let length = jalali_month_length(year, month).unwrap_or(29);
        (Just(year), Just(month), 1u32..=length)
    })
}

proptest! {
    #[test]
    fn jalali_round_trips_through_gregorian((year, month, day) in valid_jalali()) {
        let gregorian = jalali_to_gregorian(year, month, day).unwrap();
        let back = gregorian_to_jalali(gregorian).unwrap();
        prop_assert_eq!(back, JalaliDate { year, month, day });
    }

    #[test]
    fn consecutive_jalali_days_are_consecutive_gregorian_days((year, month, day) in valid_jalali()) {
        let today = jalali_to_gregorian(year, month, day).unwrap();
        let next = today.succ_opt().unwrap();
        let next_jalali = gregorian_to_jalali(next).unwrap();
        let current = JalaliDate { year, month, day };
        prop_assert!(next_jalali > current);
        prop_assert!(is_valid_jalali(next_jalali.year, next_jalali.month, next_jalali.day));
    }

    #[test]
    fn jalali_text_parses_to_converted_date((year, month, day) in valid_jalali()) {
        let text = format!("{year}/{month:02}/{day:02}");
        let parsed = parse_visit_text(&text).unwrap();
        prop_assert_eq!(parsed.date(), jalali_to_gregorian(year, month, day).unwrap());
    }
}

#[test]
fn jalali_years_have_expected_lengths() {
    for year in 1300..=1500 {
        let start = jalali_to_gregorian(year, 1, 1).unwrap();
        let next = jalali_to_gregorian(year + 1, 1, 1).unwrap();
        let days = (next - start).num_days();
        let expected = if jalali_month_length(year, 12) == Some(30) { 366 } else { 365 };
        assert_eq!(days, expected, "year {year}");
    }
}

#[test]
fn nowruz_stays_near_march_equinox() {
    for year in 1300..=1500 {
        let nowruz = jalali_to_gregorian(year, 1, 1).unwrap();
        assert_eq!(nowruz.month(), 3, "year {year}");
        assert!((19..=22).contains(&nowruz.day()), "year {year}: {nowruz}");
    }
}

#[test]
fn gregorian_dates_outside_jalali_range_are_kept() {
    let parsed = parse_visit_text("1999/12/31").unwrap();
    assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
}
