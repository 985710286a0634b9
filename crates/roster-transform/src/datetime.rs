//! Visit date disambiguation.
//!
//! A visit cell may hold a native date/time, a spreadsheet day serial or free
//! text in either the Jalali or the Gregorian calendar. Everything resolves to
//! a Gregorian [`NaiveDateTime`]; anything that cannot be resolved is `None`,
//! never an error.

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;

use roster_common::{normalize_digits, strip_invisible};
use roster_model::CellValue;

use crate::jalali::{gregorian_to_jalali, is_valid_jalali, jalali_to_gregorian};

/// `Y(YY)/M(M)/D(D)` with an optional `H:MM[:SS]` time, searched anywhere in the text.
static DATE_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{3,4})/(\d{1,2})/(\d{1,2})(?:[\sT]+(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?)?")
        .expect("Invalid visit date regex")
});

/// Jalali years accepted by the calendar heuristic.
pub const JALALI_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1300..=1500;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Which calendar a parsed triple was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarKind {
    Jalali,
    Gregorian,
}

/// Decides the calendar of a year/month/day triple and returns the Gregorian date.
///
/// The triple is Jalali when the year is in 1300..=1500 and the date is valid
/// in that calendar; otherwise it is read as Gregorian.
pub fn resolve_triple(year: i32, month: u32, day: u32) -> Option<(NaiveDate, CalendarKind)> {
    if JALALI_YEAR_RANGE.contains(&year) && is_valid_jalali(year, month, day) {
        return jalali_to_gregorian(year, month, day)
            .ok()
            .map(|date| (date, CalendarKind::Jalali));
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, CalendarKind::Gregorian))
}

/// Converts a spreadsheet day serial (day 0 = 1899-12-30) to a date/time.
pub fn from_serial_days(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let origin = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let whole_days = serial.floor();
    let seconds = ((serial - whole_days) * SECONDS_PER_DAY).round();
    let delta = TimeDelta::try_days(whole_days as i64)?
        .checked_add(&TimeDelta::try_seconds(seconds as i64)?)?;
    origin.checked_add_signed(delta)
}

/// Whole numbers shaped like `YYYYMMDD` are compact dates, not serials.
fn compact_date_number(value: f64) -> Option<String> {
    if value.fract() != 0.0 || !(10_000_000.0..100_000_000.0).contains(&value) {
        return None;
    }
    Some(format!("{}", value as i64))
}

fn capture_u32(captures: &regex::Captures<'_>, index: usize) -> Option<u32> {
    captures.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Parses free text such as `1403/01/05`, `۱۴۰۳-۰۱-۰۵ ۱۰:۳۰`, `2024.03.24`
/// or `20240324`.
pub fn parse_visit_text(raw: &str) -> Option<NaiveDateTime> {
    let text: String = strip_invisible(&normalize_digits(raw))
        .replace(['.', '-'], "/")
        .trim()
        .to_string();
    if text.is_empty() {
        return None;
    }
    let text = if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/{}/{}", &text[..4], &text[4..6], &text[6..])
    } else {
        text
    };

    let captures = DATE_TIME_REGEX.captures(&text)?;
    let year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let month = capture_u32(&captures, 2)?;
    let day = capture_u32(&captures, 3)?;
    let time = match (capture_u32(&captures, 4), capture_u32(&captures, 5)) {
        (Some(hour), Some(minute)) => {
            let second = capture_u32(&captures, 6).unwrap_or(0);
            NaiveTime::from_hms_opt(hour, minute, second)?
        }
        _ => NaiveTime::MIN,
    };
    let (date, _) = resolve_triple(year, month, day)?;
    Some(date.and_time(time))
}

/// Resolves a visit cell to a Gregorian instant.
pub fn parse_visit_instant(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Missing => None,
        CellValue::DateTime(value) => Some(*value),
        CellValue::Number(value) => match compact_date_number(*value) {
            Some(text) => parse_visit_text(&text),
            None => from_serial_days(*value),
        },
        CellValue::Text(text) => parse_visit_text(text),
    }
}

/// Canonical storage form, `YYYY-MM-DD`.
pub fn format_visit_date(instant: &NaiveDateTime) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Jalali `YYYY/MM/DD`, or Gregorian `YYYY-MM-DD` when the date predates the
/// Jalali range.
pub fn format_visit_date_ui(instant: &NaiveDateTime) -> String {
    match gregorian_to_jalali(instant.date()) {
        Ok(jalali) => jalali.to_string(),
        Err(_) => format_visit_date(instant),
    }
}

/// Jalali `YYYY/MM/DD HH:MM` with the same fallback as [`format_visit_date_ui`].
pub fn format_visit_datetime_ui(instant: &NaiveDateTime) -> String {
    match gregorian_to_jalali(instant.date()) {
        Ok(jalali) => format!("{jalali} {}", instant.format("%H:%M")),
        Err(_) => instant.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// ISO-8601 with the given UTC offset, e.g. `2024-03-24T10:30:00+03:30`.
///
/// The instant is read as local time at that offset. Returns `None` for an
/// offset outside ±24h.
pub fn format_visit_date_db(instant: &NaiveDateTime, offset_minutes: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_minutes.checked_mul(60)?)?;
    let local = instant.and_local_timezone(offset).single()?;
    Some(local.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn jalali_text_is_converted() {
        assert_eq!(parse_visit_text("1403/01/05"), Some(at(2024, 3, 24, 0, 0, 0)));
        assert_eq!(
            parse_visit_text("۱۴۰۳-۰۱-۰۵ ۱۰:۳۰"),
            Some(at(2024, 3, 24, 10, 30, 0))
        );
    }

    #[test]
    fn gregorian_text_passes_through() {
        assert_eq!(
            parse_visit_text("2024.03.24 08:15:09"),
            Some(at(2024, 3, 24, 8, 15, 9))
        );
        assert_eq!(
            parse_visit_text("2024-03-24T08:15"),
            Some(at(2024, 3, 24, 8, 15, 0))
        );
    }

    #[test]
    fn compact_eight_digits() {
        assert_eq!(parse_visit_text("14030105"), Some(at(2024, 3, 24, 0, 0, 0)));
        assert_eq!(parse_visit_text("20240324"), Some(at(2024, 3, 24, 0, 0, 0)));
    }

    #[test]
    fn bidi_marks_are_ignored() {
        assert_eq!(
            parse_visit_text("\u{200F}1403/01/05\u{200E}"),
            Some(at(2024, 3, 24, 0, 0, 0))
        );
    }

    #[test]
    fn invalid_jalali_in_range_falls_back_to_gregorian_check() {
        // Azar has 30 days and so does September.
        assert_eq!(parse_visit_text("1400/09/31"), None);
        assert_eq!(
            resolve_triple(1400, 7, 31).map(|(_, kind)| kind),
            Some(CalendarKind::Gregorian)
        );
        assert_eq!(
            resolve_triple(1400, 7, 30).map(|(_, kind)| kind),
            Some(CalendarKind::Jalali)
        );
        assert_eq!(
            resolve_triple(1299, 1, 1).map(|(_, kind)| kind),
            Some(CalendarKind::Gregorian)
        );
    }

    #[test]
    fn unparseable_inputs() {
        for raw in ["", "tomorrow", "1403/13/01", "2024/02/30", "1403/01/05 25:00"] {
            assert_eq!(parse_visit_text(raw), None, "{raw}");
        }
    }

    #[test]
    fn spreadsheet_serials() {
        assert_eq!(from_serial_days(45375.0), Some(at(2024, 3, 24, 0, 0, 0)));
        assert_eq!(from_serial_days(45375.5), Some(at(2024, 3, 24, 12, 0, 0)));
        assert_eq!(from_serial_days(f64::NAN), None);
        assert_eq!(
            parse_visit_instant(&CellValue::Number(14_030_105.0)),
            Some(at(2024, 3, 24, 0, 0, 0))
        );
    }

    #[test]
    fn native_values_pass_through() {
        let instant = at(2024, 3, 24, 9, 0, 0);
        assert_eq!(parse_visit_instant(&CellValue::DateTime(instant)), Some(instant));
        assert_eq!(parse_visit_instant(&CellValue::Missing), None);
    }

    #[test]
    fn display_projections() {
        let instant = at(2024, 3, 24, 10, 30, 0);
        assert_eq!(format_visit_date(&instant), "2024-03-24");
        assert_eq!(format_visit_date_ui(&instant), "1403/01/05");
        assert_eq!(format_visit_datetime_ui(&instant), "1403/01/05 10:30");
        assert_eq!(
            format_visit_date_db(&instant, 210).as_deref(),
            Some("2024-03-24T10:30:00+03:30")
        );
        assert_eq!(
            format_visit_date_db(&instant, 0).as_deref(),
            Some("2024-03-24T10:30:00+00:00")
        );
    }

    #[test]
    fn ui_projection_falls_back_before_jalali_range() {
        let instant = at(1500, 6, 1, 7, 5, 0);
        assert_eq!(format_visit_date_ui(&instant), "1500-06-01");
        assert_eq!(format_visit_datetime_ui(&instant), "1500-06-01 07:05");
    }
}
