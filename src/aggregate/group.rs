use super::{round2, View};
use crate::model::{Tag, Transaction, YearMonth};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The time bucket used by `View::trend`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKey {
    Year,
    #[default]
    Month,
    YearMonth,
}

serde_plain::derive_display_from_serialize!(PeriodKey);
serde_plain::derive_fromstr_from_deserialize!(PeriodKey);

impl PeriodKey {
    fn of(self, transaction: &Transaction) -> Period {
        let date = transaction.date();
        match self {
            PeriodKey::Year => Period::Year(date.year()),
            PeriodKey::Month => Period::Month(date.month()),
            PeriodKey::YearMonth => Period::YearMonth(transaction.year_month()),
        }
    }
}

/// The column used as the second grouping key of `View::trend`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    #[default]
    Category,
    Account,
    Direction,
}

serde_plain::derive_display_from_serialize!(GroupKey);
serde_plain::derive_fromstr_from_deserialize!(GroupKey);

impl GroupKey {
    fn of(self, transaction: &Transaction) -> String {
        match self {
            GroupKey::Category => transaction.category().to_string(),
            GroupKey::Account => transaction.account().to_string(),
            GroupKey::Direction => transaction.direction().to_string(),
        }
    }
}

/// A time bucket. A year serializes as `2024`, a calendar month as `1` and a year-month as
/// `"2024-01"`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(untagged)]
pub enum Period {
    Year(i32),
    Month(u32),
    YearMonth(YearMonth),
}

/// One `(period, group)` bucket of a trend.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TrendRow {
    pub period: Period,
    pub group: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// How much of a view's total is attributed to one tag. `impact` is a percentage of the view's
/// total, including untagged rows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TagImpact {
    pub tag: Tag,
    pub value: Decimal,
    pub impact: Decimal,
}

impl<'a> View<'a> {
    /// Sums amounts per distinct `(period, group)` pair present in the view, ordered by period
    /// and then by group.
    pub fn trend(&self, period_key: PeriodKey, group_key: GroupKey) -> Vec<TrendRow> {
        let mut buckets: BTreeMap<(Period, String), Decimal> = BTreeMap::new();
        for t in self.iter() {
            *buckets
                .entry((period_key.of(t), group_key.of(t)))
                .or_default() += t.amount();
        }
        buckets
            .into_iter()
            .map(|((period, group), amount)| TrendRow {
                period,
                group,
                amount: round2(amount),
            })
            .collect()
    }

    /// Sums amounts per category, smallest total first. Equal totals are ordered by category.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for t in self.iter() {
            *totals.entry(t.category()).or_default() += t.amount();
        }
        let mut totals: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.to_string(),
                amount: round2(amount),
            })
            .collect();
        // stable, so ties stay in category order
        totals.sort_by(|a, b| a.amount.cmp(&b.amount));
        totals
    }

    /// Attributes the full amount of every tagged transaction to each of its tags, once per
    /// occurrence, and reports each tag's sum as a share of the view's total.
    ///
    /// Impacts add up to at most 100 when no transaction carries more than one tag. Rows with
    /// several tags are counted for each of them, so the impacts may then add up to more than
    /// 100. An empty view, or one whose total is zero, has no tag impact.
    pub fn tag_impact(&self) -> Vec<TagImpact> {
        let total: Decimal = self.iter().map(Transaction::amount).sum();
        if total.is_zero() {
            return Vec::new();
        }
        let mut values: BTreeMap<&Tag, Decimal> = BTreeMap::new();
        for t in self.iter() {
            for tag in t.tags() {
                *values.entry(tag).or_default() += t.amount();
            }
        }
        values
            .into_iter()
            .map(|(tag, value)| TagImpact {
                tag: tag.clone(),
                value: round2(value),
                impact: round2(value / total * Decimal::ONE_HUNDRED),
            })
            .collect()
    }
}
