//! Accepted header spellings per logical field, in priority order.

use roster_model::LogicalField;

const IDENTITY_NUMBER: &[&str] = &["کدملی", "کد ملی", "شناسه ملی", "national_id"];
const FULL_NAME: &[&str] = &["بیمار", "نام و نام خانوادگی", "نام بیمار", "full_name"];
const PHONE: &[&str] = &["موبایل", "شماره موبایل", "شماره تماس", "mobile"];
const VISIT_DATE: &[&str] = &["تاریخ اخذ", "visit_date"];
const STATUS: &[&str] = &["وضعیت", "status"];
const APPOINTMENT_TYPE: &[&str] = &["نوع", "appointment_type"];
const CLINIC: &[&str] = &["درمانگاه", "clinic"];

/// Built-in aliases for `field`.
pub fn builtin_aliases(field: LogicalField) -> &'static [&'static str] {
    match field {
        LogicalField::IdentityNumber => IDENTITY_NUMBER,
        LogicalField::FullName => FULL_NAME,
        LogicalField::Phone => PHONE,
        LogicalField::VisitDate => VISIT_DATE,
        LogicalField::Status => STATUS,
        LogicalField::AppointmentType => APPOINTMENT_TYPE,
        LogicalField::Clinic => CLINIC,
    }
}
