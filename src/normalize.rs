//! Turns a raw sheet export into a canonical `Ledger`.
//!
//! The steps run in this order:
//! 1. locate the required columns (case-insensitive) and ignore the rest,
//! 2. drop `Transfer` rows,
//! 3. parse amounts, accepting a decimal comma,
//! 4. parse dates day-first,
//! 5. split the signed amount into a magnitude and a direction,
//! 6. pull `#tags` out of the description.
//!
//! Every row is checked before anything is returned. If any row is invalid the whole load fails
//! with `LoadError::Parse` listing all offending cells, so that data-entry mistakes are not
//! silently dropped from the totals.

use crate::error::{LoadError, RowIssue};
use crate::model::{
    Amount, Cell, Column, Ledger, Mapping, RawTable, Tag, Transaction, TRANSFER_CATEGORY,
};
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

/// Converts `raw` into a `Ledger`.
///
/// # Errors
/// - `LoadError::Schema` when a required column is missing or duplicated.
/// - `LoadError::Parse` when any non-transfer row has an invalid date, amount or category.
pub fn normalize(raw: &RawTable) -> Result<Ledger, LoadError> {
    let mapping = Mapping::new(raw.headers())?;
    let rows = non_transfer_rows(raw, &mapping, 0..raw.len());
    let skipped = raw.len() - rows.len();

    let mut transactions = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();
    for row_ix in rows {
        match normalize_row(raw, &mapping, row_ix) {
            Ok(transaction) => transactions.push(transaction),
            Err(mut row_issues) => issues.append(&mut row_issues),
        }
    }

    if !issues.is_empty() {
        debug!("{} issues found while normalizing the ledger", issues.len());
        return Err(LoadError::Parse(issues));
    }

    debug!(
        "Normalized {} rows into {} transactions, skipped {} transfers",
        raw.len(),
        transactions.len(),
        skipped
    );
    Ok(Ledger::new(transactions))
}

/// Returns true for the reserved category of internal money movements.
pub fn is_transfer(category: &str) -> bool {
    category == TRANSFER_CATEGORY
}

/// Keeps the indexes in `rows` whose category is not `Transfer`.
fn non_transfer_rows(
    raw: &RawTable,
    mapping: &Mapping,
    rows: impl IntoIterator<Item = usize>,
) -> Vec<usize> {
    let category = mapping.index(Column::Category);
    rows.into_iter()
        .filter(|&row_ix| !is_transfer(&raw.cell(row_ix, category).to_string()))
        .collect()
}

fn normalize_row(
    raw: &RawTable,
    mapping: &Mapping,
    row_ix: usize,
) -> Result<Transaction, Vec<RowIssue>> {
    // Header is sheet row 1.
    let row = row_ix + 2;
    let cell = |column: Column| raw.cell(row_ix, mapping.index(column));
    let mut issues = Vec::new();

    let date_cell = cell(Column::Date);
    let date = match parse_day_first(&date_cell.to_string()) {
        Some(date) => Some(date),
        None => {
            let reason = if date_cell.is_blank() {
                "is empty"
            } else {
                "is not a day-first date"
            };
            issues.push(RowIssue::new(row, Column::Date, date_cell.to_string(), reason));
            None
        }
    };

    let amount_cell = cell(Column::Amount);
    let amount = match Amount::from_cell(amount_cell) {
        Ok(amount) => Some(amount),
        Err(e) => {
            issues.push(RowIssue::new(
                row,
                Column::Amount,
                amount_cell.to_string(),
                e.to_string(),
            ));
            None
        }
    };

    let category_cell = cell(Column::Category);
    let category = category_cell.to_string();
    if category_cell.is_blank() {
        issues.push(RowIssue::new(row, Column::Category, category.as_str(), "is empty"));
    }

    let (date, amount) = match (date, amount) {
        (Some(date), Some(amount)) if issues.is_empty() => (date, amount),
        _ => return Err(issues),
    };

    // The direction must be read before the sign is dropped.
    let is_expense = amount.is_negative();
    let (description, tags) = match cell(Column::Description) {
        Cell::Text(text) => Tag::extract(text),
        Cell::Empty | Cell::Number(_) => (String::new(), Vec::new()),
    };

    Ok(Transaction::new(
        date,
        category,
        cell(Column::Account).to_string(),
        amount.magnitude(),
        is_expense,
        description,
        tags,
    ))
}

/// Parses a date written day-first, e.g. `31/01/2024`, `31-01-2024`, `31.1.24`, optionally followed
/// by a time of day which is discarded. ISO `2024-01-31` is also accepted. A month-first reading
/// such as `01/31/2024` is used only when the day-first reading is not a valid date.
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let (date_part, time_part) = match s.split_once([' ', 'T']) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (s, None),
    };
    if let Some(time) = time_part {
        let valid = ["%H:%M:%S", "%H:%M", "%H:%M:%S%.f"]
            .iter()
            .any(|format| NaiveTime::parse_from_str(time, format).is_ok());
        if !valid {
            return None;
        }
    }

    let separator = date_part.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = date_part.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if ![first, second, third]
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    if first.len() == 4 {
        let year = first.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, second.parse().ok()?, third.parse().ok()?);
    }

    if first.len() > 2 || second.len() > 2 {
        return None;
    }
    let year = match third.len() {
        4 => third.parse().ok()?,
        2 => expand_two_digit_year(third.parse().ok()?),
        _ => return None,
    };
    let day: u32 = first.parse().ok()?;
    let month: u32 = second.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

/// `24` is 2024 and `85` is 1985; the pivot is 69.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 {
        2000 + year
    } else {
        1900 + year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        let mut all = vec![vec!["Date", "Category", "Amount", "Account", "Description"]];
        all.extend(rows);
        RawTable::from_text_rows(all).unwrap()
    }

    #[test]
    fn test_normalize_reference_row() {
        let raw = table(vec![vec![
            "31/01/2024",
            "Housing",
            "-1.200,50",
            "Revolut",
            "rent #home #jan",
        ]]);
        let ledger = normalize(&raw).unwrap();
        assert_eq!(ledger.len(), 1);
        let t = &ledger.transactions()[0];
        assert_eq!(t.date(), ymd(2024, 1, 31));
        assert_eq!(t.category(), "Housing");
        assert_eq!(t.amount(), dec("1200.50"));
        assert!(t.is_expense());
        assert_eq!(t.account(), "Revolut");
        assert_eq!(t.description(), "rent  ");
        assert_eq!(t.tags(), &[Tag::new("home"), Tag::new("jan")]);
    }

    #[test]
    fn test_normalize_income_and_missing_description() {
        let raw = table(vec![vec!["05/02/2024", "Salary", "2500", "HSBC", ""]]);
        let ledger = normalize(&raw).unwrap();
        let t = &ledger.transactions()[0];
        assert!(!t.is_expense());
        assert_eq!(t.amount(), dec("2500"));
        assert_eq!(t.description(), "");
        assert!(t.tags().is_empty());
    }

    #[test]
    fn test_normalize_numeric_cells() {
        let raw = RawTable::new(
            ["date", "category", "amount", "account", "description"],
            vec![vec![
                Cell::from("01/03/2024"),
                Cell::from("Food"),
                Cell::Number(dec("-12.5")),
                Cell::from("Cash"),
                Cell::Number(dec("42")),
            ]],
        )
        .unwrap();
        let ledger = normalize(&raw).unwrap();
        let t = &ledger.transactions()[0];
        assert_eq!(t.amount(), dec("12.5"));
        assert!(t.is_expense());
        assert_eq!(t.description(), "");
    }

    #[test]
    fn test_normalize_drops_transfers_before_parsing() {
        let raw = table(vec![
            vec!["01/01/2024", "Transfer", "not a number", "Revolut", ""],
            vec!["02/01/2024", "Food", "-3", "Cash", ""],
            vec!["03/01/2024", "transfer", "-4", "Cash", ""],
        ]);
        let ledger = normalize(&raw).unwrap();
        let categories: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(Transaction::category)
            .collect();
        // Only the exact reserved value is a transfer.
        assert_eq!(categories, vec!["Food", "transfer"]);
    }

    #[test]
    fn test_transfer_exclusion_is_idempotent() {
        let raw = table(vec![
            vec!["01/01/2024", "Transfer", "10", "A", ""],
            vec!["02/01/2024", "Food", "-3", "A", ""],
            vec!["03/01/2024", "Transfer", "-10", "B", ""],
            vec!["04/01/2024", "Salary", "100", "B", ""],
        ]);
        let mapping = Mapping::new(raw.headers()).unwrap();
        let once = non_transfer_rows(&raw, &mapping, 0..raw.len());
        let twice = non_transfer_rows(&raw, &mapping, once.clone());
        assert_eq!(once, vec![1, 3]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_ignores_extra_columns() {
        let raw = RawTable::from_text_rows(vec![
            vec!["", "Date", "Description", "Category", "Amount", "Account", "In main currency"],
            vec!["0", "15/06/2023", "gift #bday", "Gifts", "50,00", "Cash", "50"],
        ])
        .unwrap();
        let ledger = normalize(&raw).unwrap();
        let t = &ledger.transactions()[0];
        assert_eq!(t.date(), ymd(2023, 6, 15));
        assert_eq!(t.amount(), dec("50.00"));
        assert_eq!(t.tags(), &[Tag::new("bday")]);
    }

    #[test]
    fn test_normalize_missing_column_is_schema_error() {
        let raw = RawTable::from_text_rows(vec![
            vec!["Date", "Category", "Amount", "Description"],
            vec!["01/01/2024", "Food", "-1", ""],
        ])
        .unwrap();
        match normalize(&raw).unwrap_err() {
            LoadError::Schema(e) => assert_eq!(e.missing_columns(), &[Column::Account]),
            other => panic!("expected a schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_collects_every_bad_row() {
        let raw = table(vec![
            vec!["01/01/2024", "Food", "-1", "Cash", ""],
            vec!["99/99/2024", "Food", "abc", "Cash", ""],
            vec!["02/01/2024", "Food", "-2", "Cash", ""],
            vec!["03/01/2024", "", "", "Cash", ""],
        ]);
        let e = normalize(&raw).unwrap_err();
        assert_eq!(e.rows(), vec![3, 5]);
        let LoadError::Parse(issues) = e else {
            panic!("expected a parse error");
        };
        let columns: Vec<(usize, Column)> =
            issues.iter().map(|i| (i.row(), i.column())).collect();
        assert_eq!(
            columns,
            vec![
                (3, Column::Date),
                (3, Column::Amount),
                (5, Column::Amount),
                (5, Column::Category),
            ]
        );
    }

    #[test]
    fn test_normalize_rejects_amounts_too_large_to_sum() {
        let raw = table(vec![
            vec!["01/01/2024", "Food", "-50000000000000000000000000000", "Cash", ""],
            vec!["02/01/2024", "Food", "-50000000000000000000000000000", "Cash", ""],
            vec!["03/01/2024", "Food", "-1.000.000.000.000.000,00", "Cash", ""],
        ]);
        let e = normalize(&raw).unwrap_err();
        assert_eq!(e.rows(), vec![2, 3]);
        let LoadError::Parse(issues) = e else {
            panic!("expected a parse error");
        };
        assert!(issues.iter().all(|i| i.column() == Column::Amount));
        assert!(issues[0].reason().starts_with("is larger than"));
    }

    #[test]
    fn test_normalize_keeps_blank_description() {
        let raw = table(vec![vec!["01/01/2024", "Food", "-1", "Cash", "   "]]);
        let ledger = normalize(&raw).unwrap();
        assert_eq!(ledger.transactions()[0].description(), "   ");
        assert!(ledger.transactions()[0].tags().is_empty());
    }

    #[test]
    fn test_normalize_blank_cells_are_reported_as_empty() {
        let raw = table(vec![vec!["  ", " ", "-1", "Cash", ""]]);
        let LoadError::Parse(issues) = normalize(&raw).unwrap_err() else {
            panic!("expected a parse error");
        };
        let reasons: Vec<(Column, &str)> = issues
            .iter()
            .map(|i| (i.column(), i.reason()))
            .collect();
        assert_eq!(
            reasons,
            vec![(Column::Date, "is empty"), (Column::Category, "is empty")]
        );
    }

    #[test]
    fn test_normalize_empty_table() {
        let raw = table(Vec::new());
        let ledger = normalize(&raw).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_parse_day_first_formats() {
        assert_eq!(parse_day_first("31/01/2024"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_day_first("1/2/2024"), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_day_first("01-02-2024"), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_day_first("01.02.2024"), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_day_first("01/02/24"), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_day_first("01/02/99"), Some(ymd(1999, 2, 1)));
        assert_eq!(parse_day_first("2024-02-01"), Some(ymd(2024, 2, 1)));
        assert_eq!(parse_day_first(" 31/01/2024 "), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_parse_day_first_prefers_day_first() {
        // Ambiguous: 3 February, not 2 March.
        assert_eq!(parse_day_first("03/02/2024"), Some(ymd(2024, 2, 3)));
        // Only a month-first reading is valid.
        assert_eq!(parse_day_first("01/31/2024"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_parse_day_first_with_time() {
        assert_eq!(parse_day_first("31/01/2024 18:30:00"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_day_first("31/01/2024 18:30"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_day_first("2024-01-31T08:00:00"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_day_first("31/01/2024 noon"), None);
    }

    #[test]
    fn test_parse_day_first_invalid() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("yesterday"), None);
        assert_eq!(parse_day_first("31/01"), None);
        assert_eq!(parse_day_first("32/13/2024"), None);
        assert_eq!(parse_day_first("30/02/2024"), None);
        assert_eq!(parse_day_first("1/2/3/2024"), None);
        assert_eq!(parse_day_first("31/01/202"), None);
    }
}
