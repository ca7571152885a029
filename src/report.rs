//! Reports compose aggregator queries into the summaries a user looks at: how a month compares to
//! a baseline, how a year is going, where the money of a year or month went, and which
//! transactions make up a category.
//!
//! Every report is computed from a `Ledger` and explicit parameters only. Reports own their data
//! so they can be serialized and printed.

use crate::aggregate::{
    period_comparison, Baseline, CategoryTotal, Comparison, Exclusions, GroupKey, Metric,
    PeriodKey, TagImpact, TrendRow, View,
};
use crate::model::{Direction, Ledger, Transaction, YearMonth};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// How many of the largest transactions a month overview lists by default.
pub const DEFAULT_TOP: usize = 5;

/// Tag impact of the incomes and the expenses of the same view.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Tags {
    pub incomes: Vec<TagImpact>,
    pub expenses: Vec<TagImpact>,
}

impl Tags {
    fn of(incomes: &View<'_>, expenses: &View<'_>) -> Self {
        Self {
            incomes: incomes.tag_impact(),
            expenses: expenses.tag_impact(),
        }
    }
}

/// A selected month against a baseline.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthOverview {
    pub comparison: Comparison,
    pub top_incomes: Vec<Transaction>,
    pub top_expenses: Vec<Transaction>,
    pub tags: Tags,
}

/// Compares `selected` to `baseline` and lists the `top` largest incomes and expenses of the
/// month along with the tag impact of the month.
pub fn month_overview(
    ledger: &Ledger,
    selected: YearMonth,
    baseline: Baseline,
    top: usize,
) -> MonthOverview {
    debug!("Month overview of {selected} against {baseline}");
    let (incomes, expenses) = ledger.view().split();
    let comparison = period_comparison(&incomes, &expenses, selected, baseline);
    let month_incomes = incomes.in_month(selected);
    let month_expenses = expenses.in_month(selected);
    MonthOverview {
        comparison,
        top_incomes: month_incomes.top_n(top).to_transactions(),
        top_expenses: month_expenses.top_n(top).to_transactions(),
        tags: Tags::of(&month_incomes, &month_expenses),
    }
}

/// A year against the whole previous year.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct YearOverview {
    pub year: i32,
    /// A month of `year` left out of the totals, usually the month that is still running.
    pub excluded_month: Option<YearMonth>,
    pub incomes: Metric,
    pub expenses: Metric,
    /// Monthly totals of the year by direction.
    pub trend: Vec<TrendRow>,
    pub tags: Tags,
}

/// Compares the totals of `year` to the totals of the year before.
///
/// `current` is the month that is still running. Unless `include_current_month` is set, that
/// month is left out of the totals of `year`, so that a partial month does not skew them. The
/// trend and the tags always cover the whole year.
pub fn year_overview(
    ledger: &Ledger,
    year: i32,
    current: Option<YearMonth>,
    include_current_month: bool,
) -> YearOverview {
    let excluded_month = current.filter(|c| !include_current_month && c.year() == year);
    debug!("Year overview of {year}, excluding {excluded_month:?}");
    let (incomes, expenses) = ledger.view().split();

    let totals = |view: &View<'_>| match excluded_month {
        Some(month) => view
            .select_period(Some(month.month()), Some(year), false, true)
            .sum_amount(),
        None => view.in_year(year).sum_amount(),
    };

    let previous = year.saturating_sub(1);
    let year_incomes = incomes.in_year(year);
    let year_expenses = expenses.in_year(year);
    YearOverview {
        year,
        excluded_month,
        incomes: Metric::new(totals(&incomes), incomes.in_year(previous).sum_amount()),
        expenses: Metric::new(totals(&expenses), expenses.in_year(previous).sum_amount()),
        trend: ledger
            .view()
            .in_year(year)
            .trend(PeriodKey::Month, GroupKey::Direction),
        tags: Tags::of(&year_incomes, &year_expenses),
    }
}

/// The period a breakdown covers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every month of one year, trended per month.
    Year(i32),
    /// One calendar month of every year, trended per year.
    Month(u32),
}

/// Where the incomes or the expenses of a period went.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Breakdown {
    pub direction: Direction,
    pub scope: Scope,
    pub total: Decimal,
    pub trend: Vec<TrendRow>,
    pub category_totals: Vec<CategoryTotal>,
}

/// Breaks the `direction` rows of `scope` down by category, leaving out whatever `exclusions`
/// names.
pub fn breakdown(
    ledger: &Ledger,
    direction: Direction,
    scope: Scope,
    exclusions: &Exclusions,
) -> Breakdown {
    let rows = ledger.view().direction(direction);
    let (rows, period_key) = match scope {
        Scope::Year(year) => (rows.in_year(year), PeriodKey::Month),
        Scope::Month(month) => (rows.select_period(Some(month), None, true, true), PeriodKey::Year),
    };
    let rows = rows.exclude(exclusions);
    debug!("Breaking down {} {direction} rows", rows.len());
    Breakdown {
        direction,
        scope,
        total: rows.sum_amount(),
        trend: rows.trend(period_key, GroupKey::Category),
        category_totals: rows.category_totals(),
    }
}

/// The transactions behind a category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Inspection {
    pub direction: Direction,
    pub category: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub total: Decimal,
    /// Largest amount first.
    pub transactions: Vec<Transaction>,
}

/// Lists the `direction` rows matching the optional category, calendar month and year, largest
/// first. Filters that are `None` match every row.
pub fn inspect(
    ledger: &Ledger,
    direction: Direction,
    category: Option<&str>,
    month: Option<u32>,
    year: Option<i32>,
) -> Inspection {
    let mut rows = ledger
        .view()
        .direction(direction)
        .select_period(month, year, true, true);
    if let Some(category) = category {
        rows = rows.filter_category(category);
    }
    Inspection {
        direction,
        category: category.map(str::to_string),
        month,
        year,
        total: rows.sum_amount(),
        transactions: rows.sorted_by_amount_desc().to_transactions(),
    }
}
