//! telexpense turns a personal finance ledger, as kept in a shared spreadsheet, into summaries:
//! a month or a year against a baseline, category breakdowns and tag impact.
//!
//! The pipeline has three steps:
//! - a `source` produces a `RawTable` from a sheet export,
//! - `normalize` turns the table into a `Ledger` of canonical transactions,
//! - `aggregate` and `report` query borrowed views of the ledger.

pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod normalize;
pub mod report;
pub mod source;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, LoadError, Result, RowIssue};
pub use model::{Amount, Ledger, Transaction};
