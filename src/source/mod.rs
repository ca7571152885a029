//! Sources hand a materialized ledger table to the normalizer.
//!
//! The ledger usually lives in a shared spreadsheet that a chat bot fills in. Downloading it is
//! not this crate's business: a source reads an export of that sheet that is already on disk,
//! either as CSV or as JSON. `DemoSource` carries a built-in ledger so that every command can be
//! run without any file at all.

pub(crate) mod csv;
pub(crate) mod demo;
mod json;

pub use self::csv::CsvSource;
pub use self::demo::DemoSource;
pub use self::json::JsonSource;

use crate::model::{Ledger, RawTable};
use crate::normalize::normalize;
use crate::Result;
use anyhow::bail;
use std::path::Path;
use tracing::debug;

/// The name of the sheet tab that holds the ledger.
pub const TRANSACTIONS: &str = "Transactions";

/// Something that can produce the raw ledger table: a header row followed by data rows.
#[async_trait::async_trait]
pub trait LedgerSource: Send {
    /// Reads the whole table.
    async fn table(&mut self) -> Result<RawTable>;
}

/// Picks a source for `path` by its extension: `.csv` or `.json`, in any case.
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn LedgerSource>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("json") => Ok(Box::new(JsonSource::new(path))),
        _ => bail!(
            "Unsupported ledger file '{}', expected a .csv or a .json export",
            path.display()
        ),
    }
}

/// Reads the table from `source` and normalizes it into a `Ledger`.
pub async fn load(source: &mut dyn LedgerSource) -> Result<Ledger> {
    let table = source.table().await?;
    debug!(
        "Read a table of {} rows and {} columns",
        table.len(),
        table.headers().len()
    );
    let ledger = normalize(&table)?;
    debug!("Loaded {} transactions", ledger.len());
    Ok(ledger)
}
