use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Tags every classified record carries, in this order.
pub const BASELINE_TAGS: [&str; 2] = ["noor_hospital_queue", "patient"];

/// Which lookup table a tag comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Status,
    AppointmentType,
    Clinic,
}

impl TagKind {
    pub const ALL: [TagKind; 3] = [Self::Status, Self::AppointmentType, Self::Clinic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::AppointmentType => "appointment_type",
            Self::Clinic => "clinic",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "appointment_type" | "type" => Ok(Self::AppointmentType),
            "clinic" => Ok(Self::Clinic),
            _ => Err(ModelError::UnknownTagKind(s.to_string())),
        }
    }
}

/// Insertion-ordered tag set without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a set holding the baseline tags.
    pub fn baseline() -> Self {
        let mut tags = Self::new();
        for tag in BASELINE_TAGS {
            tags.insert(tag);
        }
        tags
    }

    /// Appends `tag` unless it is blank or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.0.iter().any(|existing| existing == tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Import format: comma-joined with a trailing comma, or empty.
    pub fn to_import_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut out = self.0.join(",");
        out.push(',');
        out
    }
}
