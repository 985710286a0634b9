//! Input loading: CSV files into the generic source table.

pub mod csv_table;
pub mod error;
pub mod merge;

pub use csv_table::{CsvTable, normalize_header, read_csv_table};
pub use error::{IngestError, Result};
pub use merge::{merge_tables, read_sources};
