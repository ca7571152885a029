use crate::model::RawTable;
use crate::source::LedgerSource;
use crate::{utils, Result};
use anyhow::Context;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads a CSV export of the ledger sheet. The first record is the header row. Rows may be
/// shorter than the header row, in which case the missing trailing cells are empty.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl LedgerSource for CsvSource {
    async fn table(&mut self) -> Result<RawTable> {
        trace!("Reading CSV ledger from {}", self.path.display());
        let data = utils::read(&self.path).await?;
        parse_csv(&data).with_context(|| format!("Unable to parse {}", self.path.display()))
    }
}

/// Parses CSV text into a `RawTable`. Every non-empty field becomes a text cell.
pub(crate) fn parse_csv(data: &str) -> Result<RawTable> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    RawTable::from_text_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_parse_csv() {
        let data = "Date,Category,Amount,Account,Description\n\
            31/01/2024,Housing,\"-1.200,50\",Revolut,rent #home #jan\n\
            01/02/2024,Salary,2500,HSBC\n";
        let table = parse_csv(data).unwrap();
        assert_eq!(
            table.headers(),
            &["Date", "Category", "Amount", "Account", "Description"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), &Cell::text("-1.200,50"));
        assert_eq!(table.cell(0, 4), &Cell::text("rent #home #jan"));
        assert_eq!(table.cell(1, 4), &Cell::Empty);
    }

    #[test]
    fn test_parse_csv_keeps_blank_fields() {
        let table = parse_csv("a,b,c\n  ,x,\n").unwrap();
        assert_eq!(table.cell(0, 0), &Cell::Text("  ".to_string()));
        assert_eq!(table.cell(0, 1), &Cell::text("x"));
        assert_eq!(table.cell(0, 2), &Cell::Empty);
    }

    #[test]
    fn test_parse_csv_empty_input() {
        assert!(parse_csv("").is_err());
    }

    #[tokio::test]
    async fn test_csv_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut source = CsvSource::new(dir.path().join("nope.csv"));
        assert!(source.table().await.is_err());
    }

    #[tokio::test]
    async fn test_csv_source_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");
        utils::write(&path, "Date,Category\n01/01/2024,Food\n")
            .await
            .unwrap();
        let mut source = CsvSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        let table = source.table().await.unwrap();
        assert_eq!(table.len(), 1);
    }
}
