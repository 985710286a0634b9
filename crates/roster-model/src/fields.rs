use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline-level fields that input headers are resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    IdentityNumber,
    FullName,
    Phone,
    VisitDate,
    Status,
    AppointmentType,
    Clinic,
}

impl LogicalField {
    pub const REQUIRED: [LogicalField; 3] = [Self::IdentityNumber, Self::FullName, Self::Phone];

    pub const OPTIONAL: [LogicalField; 4] = [
        Self::VisitDate,
        Self::Status,
        Self::AppointmentType,
        Self::Clinic,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IdentityNumber => "national_id",
            Self::FullName => "full_name",
            Self::Phone => "mobile",
            Self::VisitDate => "visit_date",
            Self::Status => "status",
            Self::AppointmentType => "appointment_type",
            Self::Clinic => "clinic",
        }
    }

    pub fn all() -> impl Iterator<Item = LogicalField> {
        Self::REQUIRED.into_iter().chain(Self::OPTIONAL)
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
