//! Refresh sets returned by mutations.
//!
//! Nothing is reconciled locally after a write: each mutation names the
//! collections it invalidated and the caller re-fetches them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A collection held in page state that can be re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Players,
    Prospects,
    TeamDeals,
    DealReminders,
    Contracts,
    Payments,
    Reminders,
    Contacts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshSet(BTreeSet<Collection>);

impl RefreshSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(collections: impl IntoIterator<Item = Collection>) -> Self {
        Self(collections.into_iter().collect())
    }

    pub fn with(mut self, collection: Collection) -> Self {
        self.0.insert(collection);
        self
    }

    pub fn merge(&mut self, other: &RefreshSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn contains(&self, collection: Collection) -> bool {
        self.0.contains(&collection)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Collection> + '_ {
        self.0.iter().copied()
    }
}

/// The result of a write plus the collections it invalidated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh: RefreshSet,
}

impl<T> Mutation<T> {
    pub fn new(value: T, refresh: RefreshSet) -> Self {
        Self { value, refresh }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        Mutation {
            value: f(self.value),
            refresh: self.refresh,
        }
    }
}
