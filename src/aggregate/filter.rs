use super::View;
use crate::model::{Tag, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Categories, accounts and tags to leave out of a breakdown. Values that do not occur in the
/// ledger simply match nothing.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Exclusions {
    categories: BTreeSet<String>,
    accounts: BTreeSet<String>,
    tags: BTreeSet<Tag>,
}

impl Exclusions {
    pub fn new<C, A, T>(
        categories: impl IntoIterator<Item = C>,
        accounts: impl IntoIterator<Item = A>,
        tags: impl IntoIterator<Item = T>,
    ) -> Self
    where
        C: Into<String>,
        A: Into<String>,
        T: AsRef<str>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            accounts: accounts.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Tag::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.accounts.is_empty() && self.tags.is_empty()
    }

    /// True when the transaction's category or account is excluded, or when it carries at least
    /// one excluded tag.
    pub fn excludes(&self, transaction: &Transaction) -> bool {
        self.categories.contains(transaction.category())
            || self.accounts.contains(transaction.account())
            || transaction.tags().iter().any(|tag| self.tags.contains(tag))
    }
}

impl<'a> View<'a> {
    /// Drops every row matched by `exclusions`.
    pub fn exclude(&self, exclusions: &Exclusions) -> View<'a> {
        if exclusions.is_empty() {
            return self.clone();
        }
        self.filter(|t| !exclusions.excludes(t))
    }
}
