use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown tag kind: {0}")]
    UnknownTagKind(String),
    #[error("utc offset out of range: {0} minutes")]
    InvalidOffset(i32),
}

pub type Result<T> = std::result::Result<T, ModelError>;
