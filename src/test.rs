//! Shared test utilities for creating ledgers and test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Ledger, RawTable, Transaction};
use crate::normalize::normalize;
use crate::source::demo::SEED_LEDGER;
use crate::source::csv::parse_csv;
use crate::Config;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

pub(crate) const SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX/edit";

/// Parses a decimal literal.
pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Builds a transaction the way the normalizer would from a sheet row.
pub(crate) fn tx(
    date: &str,
    category: &str,
    amount: &str,
    account: &str,
    description: &str,
) -> Transaction {
    let table = RawTable::from_text_rows(vec![
        vec!["Date", "Category", "Amount", "Account", "Description"],
        vec![date, category, amount, account, description],
    ])
    .unwrap();
    normalize(&table).unwrap().transactions()[0].clone()
}

/// The demo ledger, normalized.
pub(crate) fn sample_ledger() -> Ledger {
    normalize(&parse_csv(SEED_LEDGER).unwrap()).unwrap()
}

/// Test environment with a telexpense home directory and `Config`. Holds `TempDir` to keep the
/// directory alive for the duration of the test.
pub(crate) struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub(crate) async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("telexpense");
        let config = Config::create(&root, SHEET_URL, None).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub(crate) fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes `contents` to a file called `name` in the home directory and returns its path.
    pub(crate) async fn write_file(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.config.root().join(name);
        crate::utils::write(&path, contents).await.unwrap();
        path
    }
}
