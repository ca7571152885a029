use crate::aggregate::View;
use crate::model::{Tag, YearMonth};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction brought money in or took money out.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(Direction);
serde_plain::derive_fromstr_from_deserialize!(Direction);

impl Direction {
    pub fn is_expense(self) -> bool {
        self == Direction::Expense
    }
}

/// A canonical ledger entry. The amount is always a magnitude; the direction lives in
/// `is_expense`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    category: String,
    account: String,
    amount: Decimal,
    is_expense: bool,
    description: String,
    tags: Vec<Tag>,
}

impl Transaction {
    /// Creates a transaction from already-normalized parts. A negative `amount` is stored as its
    /// magnitude; `is_expense` is taken as given.
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        account: impl Into<String>,
        amount: Decimal,
        is_expense: bool,
        description: impl Into<String>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            account: account.into(),
            amount: amount.abs(),
            is_expense,
            description: description.into(),
            tags,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn is_expense(&self) -> bool {
        self.is_expense
    }

    pub fn direction(&self) -> Direction {
        if self.is_expense {
            Direction::Expense
        } else {
            Direction::Income
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// The canonical transaction table produced by the normalizer. It cannot be modified once built;
/// queries run over borrowed `View`s of it.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    data: Vec<Transaction>,
}

impl Ledger {
    pub fn new(data: Vec<Transaction>) -> Self {
        Self { data }
    }

    /// A view over every transaction in the ledger.
    pub fn view(&self) -> View<'_> {
        View::new(&self.data)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
