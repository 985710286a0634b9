//! Column resolution: which input headers feed which logical field.

pub mod aliases;
pub mod error;
pub mod resolver;

pub use aliases::builtin_aliases;
pub use error::{MapError, Result};
pub use resolver::{ColumnResolution, ColumnResolver};
