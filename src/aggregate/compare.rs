use super::{round2, View};
use crate::model::YearMonth;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The reference period a selected month is compared to.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// The calendar month before the selected one.
    #[default]
    PrevMonth,
    /// The mean monthly total of the other months of the selected year.
    PrevMonthAvg,
    /// The same month one year earlier.
    PrevYear,
}

serde_plain::derive_display_from_serialize!(Baseline);
serde_plain::derive_fromstr_from_deserialize!(Baseline);

/// A current total, the baseline total and `current - previous`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Metric {
    pub current: Decimal,
    pub previous: Decimal,
    pub delta: Decimal,
}

impl Metric {
    pub fn new(current: Decimal, previous: Decimal) -> Self {
        Self {
            current,
            previous,
            delta: round2(current - previous),
        }
    }
}

/// Income and expense totals of a selected month against a baseline.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub selected: YearMonth,
    pub baseline: Baseline,
    /// The month compared against. Averages span several months and have none.
    pub compared_to: Option<YearMonth>,
    pub incomes: Metric,
    pub expenses: Metric,
}

/// Compares the totals of `selected` with the totals of the `baseline` period. `incomes` and
/// `expenses` are the two halves of a `View::split`.
pub fn period_comparison(
    incomes: &View<'_>,
    expenses: &View<'_>,
    selected: YearMonth,
    baseline: Baseline,
) -> Comparison {
    let (compared_to, prev_incomes, prev_expenses) = match baseline {
        Baseline::PrevMonth | Baseline::PrevYear => {
            let previous = if baseline == Baseline::PrevMonth {
                selected.prev_month()
            } else {
                selected.prev_year()
            };
            (
                Some(previous),
                incomes.in_month(previous).sum_amount(),
                expenses.in_month(previous).sum_amount(),
            )
        }
        Baseline::PrevMonthAvg => (
            None,
            other_months_average(incomes, selected),
            other_months_average(expenses, selected),
        ),
    };
    Comparison {
        selected,
        baseline,
        compared_to,
        incomes: Metric::new(incomes.in_month(selected).sum_amount(), prev_incomes),
        expenses: Metric::new(expenses.in_month(selected).sum_amount(), prev_expenses),
    }
}

/// The mean of the monthly totals of every month of `selected`'s year other than `selected`
/// itself. Months without rows are not counted. Zero when no other month has rows.
fn other_months_average(view: &View<'_>, selected: YearMonth) -> Decimal {
    let others = view.select_period(Some(selected.month()), Some(selected.year()), false, true);
    let mut months: BTreeMap<u32, Decimal> = BTreeMap::new();
    for t in others.iter() {
        *months.entry(t.date().month()).or_default() += t.amount();
    }
    if months.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = months.values().sum();
    round2(sum / Decimal::from(months.len()))
}
