//! Error types for column resolution.

use thiserror::Error;

use roster_model::LogicalField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// No header matched any alias of a required field.
    #[error("cannot find a column for {field}; expected one of: {}", aliases.join(", "))]
    MissingRequiredColumn {
        field: LogicalField,
        aliases: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
