use crate::model::{Cell, RawTable};
use crate::source::LedgerSource;
use crate::{utils, Result};
use anyhow::{bail, Context};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::trace;

/// Reads a JSON export of the ledger sheet: an array with one object per row, keyed by column
/// name.
///
/// ```json
/// [
///   {"Date": "31/01/2024", "Category": "Housing", "Amount": -1200.5, "Account": "Revolut",
///    "Description": "rent #home"}
/// ]
/// ```
///
/// Strings become text cells, numbers become numeric cells and `null` becomes an empty cell. A key
/// that is missing from some of the objects is an empty cell in those rows.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl LedgerSource for JsonSource {
    async fn table(&mut self) -> Result<RawTable> {
        trace!("Reading JSON ledger from {}", self.path.display());
        let value: Value = utils::deserialize(&self.path).await?;
        parse_json(value).with_context(|| format!("Unable to read {}", self.path.display()))
    }
}

pub(crate) fn parse_json(value: Value) -> Result<RawTable> {
    let Value::Array(records) = value else {
        bail!("Expected a JSON array of row objects");
    };

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (ix, record) in records.into_iter().enumerate() {
        let Value::Object(object) = record else {
            bail!("Expected a JSON object for row {}", ix + 2);
        };
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(object);
    }

    let mut rows = Vec::with_capacity(objects.len());
    for (ix, mut object) in objects.into_iter().enumerate() {
        let row = headers
            .iter()
            .map(|header| match object.remove(header) {
                Some(value) => to_cell(value),
                None => Ok(Cell::Empty),
            })
            .collect::<Result<Vec<Cell>>>()
            .with_context(|| format!("Bad value in row {}", ix + 2))?;
        rows.push(row);
    }
    RawTable::new(headers, rows)
}

fn to_cell(value: Value) -> Result<Cell> {
    Ok(match value {
        Value::Null => Cell::Empty,
        Value::String(s) => Cell::text(s),
        Value::Bool(b) => Cell::text(b.to_string()),
        Value::Number(n) => Cell::Number(to_decimal(&n)?),
        Value::Array(_) | Value::Object(_) => bail!("Nested values are not ledger cells: {value}"),
    })
}

fn to_decimal(n: &Number) -> Result<Decimal> {
    let s = n.to_string();
    Decimal::from_str(&s)
        .or_else(|_| Decimal::from_scientific(&s))
        .with_context(|| format!("Unable to represent {s} as a decimal"))
}
