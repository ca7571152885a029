//! Read-only queries over a `Ledger`.
//!
//! A `View` is a borrowed subset of a ledger's transactions. Every query takes `&self` and
//! returns either a new `View` or an owned summary, so the same ledger can be sliced any number of
//! ways without being copied or modified.

mod compare;
mod filter;
mod group;

pub use compare::{period_comparison, Baseline, Comparison, Metric};
pub use filter::Exclusions;
pub use group::{CategoryTotal, GroupKey, Period, PeriodKey, TagImpact, TrendRow};

use crate::model::{Direction, Transaction, YearMonth};
use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A borrowed, ordered subset of a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View<'a> {
    rows: Vec<&'a Transaction>,
}

impl<'a> View<'a> {
    pub fn new(rows: impl IntoIterator<Item = &'a Transaction>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.rows.iter().copied()
    }

    /// Clones the transactions of this view, e.g. for output.
    pub fn to_transactions(&self) -> Vec<Transaction> {
        self.iter().cloned().collect()
    }

    /// Keeps the rows for which `predicate` holds.
    pub fn filter(&self, predicate: impl Fn(&Transaction) -> bool) -> View<'a> {
        View::new(self.iter().filter(|t| predicate(t)))
    }

    /// Partitions the view into `(incomes, expenses)`.
    pub fn split(&self) -> (View<'a>, View<'a>) {
        let (expenses, incomes): (Vec<_>, Vec<_>) =
            self.rows.iter().copied().partition(|t| t.is_expense());
        (View { rows: incomes }, View { rows: expenses })
    }

    /// The incomes or the expenses of this view.
    pub fn direction(&self, direction: Direction) -> View<'a> {
        self.filter(|t| t.direction() == direction)
    }

    /// Filters by calendar month and/or year.
    ///
    /// A `None` or zero `month`/`year` is not filtered on. When `month_match` is false the month
    /// predicate is negated, selecting every month except `month`; `year_match` does the same for
    /// the year, independently.
    pub fn select_period(
        &self,
        month: Option<u32>,
        year: Option<i32>,
        month_match: bool,
        year_match: bool,
    ) -> View<'a> {
        let month = month.filter(|&m| m != 0);
        let year = year.filter(|&y| y != 0);
        self.filter(|t| {
            let date = t.date();
            let month_ok = month.map_or(true, |m| (date.month() == m) == month_match);
            let year_ok = year.map_or(true, |y| (date.year() == y) == year_match);
            month_ok && year_ok
        })
    }

    /// The rows of a single calendar month.
    pub fn in_month(&self, period: YearMonth) -> View<'a> {
        self.select_period(Some(period.month()), Some(period.year()), true, true)
    }

    /// The rows of a single year.
    pub fn in_year(&self, year: i32) -> View<'a> {
        self.select_period(None, Some(year), true, true)
    }

    /// The sum of all amounts, rounded to cents. An empty view sums to zero.
    pub fn sum_amount(&self) -> Decimal {
        round2(self.iter().map(Transaction::amount).sum())
    }

    /// The `n` largest transactions, largest first. Ties keep their order in the view.
    pub fn top_n(&self, n: usize) -> View<'a> {
        let mut sorted = self.sorted_by_amount_desc();
        sorted.rows.truncate(n);
        sorted
    }

    /// Every row, largest amount first. Ties keep their order in the view.
    pub fn sorted_by_amount_desc(&self) -> View<'a> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.amount().cmp(&a.amount()));
        View { rows }
    }

    /// Only the rows of `category`.
    pub fn filter_category(&self, category: &str) -> View<'a> {
        self.filter(|t| t.category() == category)
    }
}

impl<'a> IntoIterator for View<'a> {
    type Item = &'a Transaction;
    type IntoIter = std::vec::IntoIter<&'a Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
