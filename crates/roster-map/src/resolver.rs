//! Header to logical-field resolution.

use std::collections::BTreeMap;

use tracing::{debug, info};

use roster_common::header_key;
use roster_model::{CellValue, LogicalField, SourceRow};

use crate::aliases::builtin_aliases;
use crate::error::{MapError, Result};

/// Matches input headers against per-field alias lists.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    aliases: BTreeMap<LogicalField, Vec<String>>,
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnResolver {
    /// Resolver with the built-in alias tables.
    pub fn new() -> Self {
        let aliases = LogicalField::all()
            .map(|field| {
                let list = builtin_aliases(field)
                    .iter()
                    .map(|alias| (*alias).to_string())
                    .collect();
                (field, list)
            })
            .collect();
        Self { aliases }
    }

    pub fn aliases(&self, field: LogicalField) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Resolves `headers` for every logical field.
    ///
    /// Headers are compared with whitespace removed and case folded. Several
    /// headers may match the same field (merged files that spelled it
    /// differently); they are kept in alias-priority order. A required field
    /// with no match is an error, an optional one is simply left unresolved.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnResolution> {
        let keys: Vec<String> = headers.iter().map(|header| header_key(header)).collect();
        let mut columns = BTreeMap::new();
        for field in LogicalField::all() {
            let mut matched: Vec<usize> = Vec::new();
            for alias in self.aliases(field) {
                let alias_key = header_key(alias);
                for (idx, key) in keys.iter().enumerate() {
                    if *key == alias_key && !matched.contains(&idx) {
                        matched.push(idx);
                    }
                }
            }
            if matched.is_empty() {
                if field.is_required() {
                    return Err(MapError::MissingRequiredColumn {
                        field,
                        aliases: self.aliases(field).to_vec(),
                    });
                }
                debug!(field = %field, "optional column not present");
                continue;
            }
            let names: Vec<&str> = matched.iter().map(|idx| headers[*idx].as_str()).collect();
            info!(field = %field, columns = ?names, "resolved column");
            columns.insert(field, matched);
        }
        Ok(ColumnResolution { columns })
    }
}

/// Which header indices feed each logical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnResolution {
    columns: BTreeMap<LogicalField, Vec<usize>>,
}

impl ColumnResolution {
    pub fn is_resolved(&self, field: LogicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Header indices for `field` in alias-priority order; empty if unresolved.
    pub fn columns(&self, field: LogicalField) -> &[usize] {
        self.columns.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// The row's value for `field`: the first non-blank cell among the
    /// matching columns, `Missing` when none has a value.
    pub fn value<'a>(&self, row: &'a SourceRow, field: LogicalField) -> &'a CellValue {
        const MISSING: &CellValue = &CellValue::Missing;
        self.columns(field)
            .iter()
            .map(|idx| row.cell(*idx))
            .find(|cell| !cell.is_missing())
            .unwrap_or(MISSING)
    }
}
