//! Jalali (solar Hijri) calendar arithmetic.
//!
//! Day counts follow the 33-year arithmetic cycle: the years at cycle offsets
//! {1, 5, 9, 13, 17, 22, 26, 30} (year modulo 33) are leap years. Jalali day
//! numbers are counted from 1 Farvardin 979, which falls 79 days after
//! 1 January 1600 (Gregorian), the origin used for the conversion.

use std::fmt;

use chrono::{NaiveDate, TimeDelta};
use thiserror::Error;

/// Month lengths of a common year; Esfand gains a day in leap years.
pub const JALALI_MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// First Jalali year the day-count arithmetic covers.
const EPOCH_YEAR: i32 = 979;
/// Days from 1600-01-01 (Gregorian) to 979-01-01 (Jalali).
const EPOCH_OFFSET_DAYS: i64 = 79;
/// Days in one 33-year cycle.
const CYCLE_DAYS: i64 = 33 * 365 + 8;
/// Days in a four-year group that starts with a leap year.
const GROUP_DAYS: i64 = 4 * 365 + 1;
const GREGORIAN_ORIGIN: NaiveDate = match NaiveDate::from_ymd_opt(1600, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid Jalali date {year}/{month}/{day}")]
    InvalidJalali { year: i32, month: u32, day: u32 },
    #[error("date {0} is before the supported calendar range")]
    OutOfRange(NaiveDate),
}

/// A calendar-valid Jalali date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if is_valid_jalali(year, month, day) {
            Ok(Self { year, month, day })
        } else {
            Err(CalendarError::InvalidJalali { year, month, day })
        }
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Leap years: `(year - 979) mod 33` is a multiple of four other than 32.
pub fn is_jalali_leap_year(year: i32) -> bool {
    let offset = (year - EPOCH_YEAR).rem_euclid(33);
    offset % 4 == 0 && offset != 32
}

pub fn jalali_month_length(year: i32, month: u32) -> Option<u32> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let base = *JALALI_MONTH_DAYS.get(index)?;
    if month == 12 && is_jalali_leap_year(year) {
        Some(base + 1)
    } else {
        Some(base)
    }
}

pub fn is_valid_jalali(year: i32, month: u32, day: u32) -> bool {
    year >= EPOCH_YEAR
        && jalali_month_length(year, month).is_some_and(|length| (1..=length).contains(&day))
}

/// Days since 979-01-01 (Jalali) for a valid date.
fn jalali_day_number(year: i32, month: u32, day: u32) -> i64 {
    let years = i64::from(year - EPOCH_YEAR);
    let mut days = 365 * years + (years / 33) * 8 + (years % 33 + 3) / 4;
    for length in JALALI_MONTH_DAYS.iter().take((month - 1) as usize) {
        days += i64::from(*length);
    }
    days + i64::from(day - 1)
}

/// Converts a Jalali triple to the Gregorian calendar.
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    if !is_valid_jalali(year, month, day) {
        return Err(CalendarError::InvalidJalali { year, month, day });
    }
    let offset = jalali_day_number(year, month, day) + EPOCH_OFFSET_DAYS;
    TimeDelta::try_days(offset)
        .and_then(|delta| GREGORIAN_ORIGIN.checked_add_signed(delta))
        .ok_or(CalendarError::InvalidJalali { year, month, day })
}

/// Converts a Gregorian date to the Jalali calendar.
///
/// Dates before 979-01-01 (Jalali), i.e. before 1600-03-20, are out of range.
pub fn gregorian_to_jalali(date: NaiveDate) -> Result<JalaliDate, CalendarError> {
    let mut days = (date - GREGORIAN_ORIGIN).num_days() - EPOCH_OFFSET_DAYS;
    if days < 0 {
        return Err(CalendarError::OutOfRange(date));
    }
    let cycles = days / CYCLE_DAYS;
    days %= CYCLE_DAYS;
    let mut years = 33 * cycles + 4 * (days / GROUP_DAYS);
    days %= GROUP_DAYS;
    if days >= 366 {
        years += (days - 1) / 365;
        days = (days - 1) % 365;
    }
    let mut month = 1u32;
    for length in JALALI_MONTH_DAYS.iter().take(11) {
        if days < i64::from(*length) {
            break;
        }
        days -= i64::from(*length);
        month += 1;
    }
    let year = i32::try_from(years)
        .ok()
        .and_then(|years| years.checked_add(EPOCH_YEAR))
        .ok_or(CalendarError::OutOfRange(date))?;
    let day = u32::try_from(days + 1).map_err(|_| CalendarError::OutOfRange(date))?;
    JalaliDate::new(year, month, day)
}
