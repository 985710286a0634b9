//! Validation policy and pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Phrase that marks an anonymous phone caller in the name column.
pub const ANONYMOUS_CALLER_MARKER: &str = "کاربر تلفنی";

/// Rule applied to identity numbers after non-digits are stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityRule {
    /// Exactly 10 digits; the last digit is a check digit over the first nine
    /// (weights 10 down to 2, modulo 11, two-branch comparison).
    #[default]
    Checksum,
    /// 8 to 11 digits.
    LengthRange,
}

/// Rule applied to phone numbers after prefix normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneRule {
    /// Only the domestic mobile form `09XXXXXXXXX`.
    #[default]
    Strict,
    /// Additionally accept any 10 or 11 digit number as-is.
    Lenient,
}

/// What happens to accepted survivors that still lack identity, first or last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFieldMode {
    #[default]
    RouteToExcluded,
    /// Discard them; the count is logged and reported.
    Drop,
}

/// Named field-validation strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub identity: IdentityRule,
    pub phone: PhoneRule,
    /// Minimum character count of each of first and last name.
    pub min_name_len: usize,
    /// Marker phrases that flag a name as an anonymous caller.
    pub anonymous_markers: Vec<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ValidationPolicy {
    /// Checksum identity numbers, strict mobiles, three-character name parts.
    pub fn canonical() -> Self {
        Self {
            identity: IdentityRule::Checksum,
            phone: PhoneRule::Strict,
            min_name_len: 3,
            anonymous_markers: vec![ANONYMOUS_CALLER_MARKER.to_string()],
        }
    }

    /// Length-range identity numbers and lenient phones.
    pub fn lenient() -> Self {
        Self {
            identity: IdentityRule::LengthRange,
            phone: PhoneRule::Lenient,
            ..Self::canonical()
        }
    }

    #[must_use]
    pub fn with_min_name_len(mut self, min: usize) -> Self {
        self.min_name_len = min;
        self
    }
}

/// Which columns the output tables carry beyond the fixed core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub include_gender: bool,
    /// Adds `visit_date_ui`, `visit_datetime_ui` and `visit_date_db`.
    pub include_display_dates: bool,
    /// Offset attached to `visit_date_db`, in minutes east of UTC.
    pub db_utc_offset_minutes: i32,
}

/// Iran Standard Time, +03:30.
pub const DEFAULT_DB_OFFSET_MINUTES: i32 = 210;

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            include_gender: true,
            include_display_dates: true,
            db_utc_offset_minutes: DEFAULT_DB_OFFSET_MINUTES,
        }
    }
}

impl OutputOptions {
    /// Only the import contract columns: no gender, no display projections.
    pub fn minimal() -> Self {
        Self {
            include_gender: false,
            include_display_dates: false,
            ..Self::default()
        }
    }

    pub fn with_db_offset(mut self, minutes: i32) -> Result<Self> {
        if !(-14 * 60..=14 * 60).contains(&minutes) {
            return Err(ModelError::InvalidOffset(minutes));
        }
        self.db_utc_offset_minutes = minutes;
        Ok(self)
    }
}

/// Everything the batch pipeline needs besides the input table and lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub policy: ValidationPolicy,
    pub required_fields: RequiredFieldMode,
    pub output: OutputOptions,
}
