//! Error types.
//!
//! Application code uses `anyhow` through the `Error` and `Result` aliases. The ledger pipeline
//! reports its own failures with `LoadError` so that callers can tell a bad header row apart from
//! bad cell values.

use crate::model::{Column, SchemaError};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The reasons a raw table cannot be turned into a `Ledger`. No partial ledger is produced in
/// either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// One or more of the required columns is missing (or appears more than once).
    Schema(SchemaError),
    /// At least one row has a value that cannot be parsed. Every offending row is listed.
    Parse(Vec<RowIssue>),
}

impl LoadError {
    /// The sheet row numbers of all rows that failed to parse. Empty for schema errors.
    pub fn rows(&self) -> Vec<usize> {
        match self {
            LoadError::Schema(_) => Vec::new(),
            LoadError::Parse(issues) => {
                let mut rows: Vec<usize> = issues.iter().map(RowIssue::row).collect();
                rows.dedup();
                rows
            }
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Schema(e) => Display::fmt(e, f),
            LoadError::Parse(issues) => {
                let count = self.rows().len();
                write!(
                    f,
                    "{} row{} could not be parsed",
                    count,
                    if count == 1 { "" } else { "s" }
                )?;
                for issue in issues {
                    write!(f, "\n  {issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for LoadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LoadError::Schema(e) => Some(e),
            LoadError::Parse(_) => None,
        }
    }
}

impl From<SchemaError> for LoadError {
    fn from(value: SchemaError) -> Self {
        LoadError::Schema(value)
    }
}

/// A single unparseable cell. `row` is the row number as seen in the sheet, where the header is
/// row 1 and the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    row: usize,
    column: Column,
    value: String,
    reason: String,
}

impl RowIssue {
    pub fn new(
        row: usize,
        column: Column,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            column,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for RowIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}, {}: '{}' {}",
            self.row, self.column, self.value, self.reason
        )
    }
}
