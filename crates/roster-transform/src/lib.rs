//! Field-level cleaning: identity numbers, phones, names and visit dates.
//!
//! Every function here degrades malformed input to `None` or an
//! [`roster_model::ExclusionReason`]; none of them fail the batch.

pub mod datetime;
pub mod identity;
pub mod jalali;
pub mod name;
pub mod phone;

pub use datetime::{
    CalendarKind, JALALI_YEAR_RANGE, format_visit_date, format_visit_date_db,
    format_visit_date_ui, format_visit_datetime_ui, from_serial_days, parse_visit_instant,
    parse_visit_text, resolve_triple,
};
pub use identity::{checksum_valid, clean_identity_number};
pub use jalali::{
    CalendarError, JalaliDate, gregorian_to_jalali, is_jalali_leap_year, is_valid_jalali,
    jalali_month_length, jalali_to_gregorian,
};
pub use name::{NameParts, is_complete_name, name_violation, split_full_name};
pub use phone::clean_phone;
