//! Shared utilities for roster crates.
//!
//! Text normalization used by every stage of the pipeline, and small Polars
//! helpers for reading output frames.

pub mod polars;
pub mod text;

pub use polars::{any_to_string, column_names, column_values, format_numeric};
pub use text::{
    digits_only, header_key, is_absent, lookup_key, normalize_digits, normalize_text,
    strip_invisible,
};
