use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::table::RowRef;
use crate::tags::TagSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit the classification engine operates on.
///
/// Built once per input row; only derived fields are attached afterwards.
/// Every text field has already been through the text normalizer, and an
/// absent value is always `None`, never an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub origin: RowRef,
    pub identity_number: Option<String>,
    pub full_name_raw: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    /// Gregorian instant; Jalali inputs are converted before they land here.
    pub visit_instant: Option<NaiveDateTime>,
    pub status_raw: Option<String>,
    pub appointment_type_raw: Option<String>,
    pub clinic_raw: Option<String>,
    pub tags: TagSet,
}

impl NormalizedRecord {
    pub fn new(origin: RowRef) -> Self {
        Self {
            origin,
            identity_number: None,
            full_name_raw: None,
            first_name: None,
            last_name: None,
            phone: None,
            gender: None,
            visit_instant: None,
            status_raw: None,
            appointment_type_raw: None,
            clinic_raw: None,
            tags: TagSet::new(),
        }
    }

    /// Full name as displayed in the excluded table.
    pub fn display_name(&self) -> Option<String> {
        if let Some(raw) = &self.full_name_raw {
            return Some(raw.clone());
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}
