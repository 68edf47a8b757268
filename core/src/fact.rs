//! Atomic facts and the shared store that records which of them are falsified.

use std::{fmt::Debug, hash::Hash};

use dashmap::DashSet;

/// The smallest unit of eliminated information the history tracks.
/// Any owned, ordered, hashable value qualifies; a puzzle would typically use a
/// `(cell, candidate)` pair.
pub trait Fact: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static {}

impl<T> Fact for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static {}

/// Shared record of falsified facts.
///
/// `mark_falsified` must be atomic and idempotent: concurrent callers marking the same fact
/// observe exactly one `true`.
pub trait FactStore<F: Fact>: Send + Sync {
    /// Mark a fact falsified. Returns true iff this call changed its state.
    fn mark_falsified(&self, fact: &F) -> bool;

    fn is_falsified(&self, fact: &F) -> bool;
}

/// A concurrent fact store backed by a sharded set.
#[derive(Debug)]
pub struct SharedFactStore<F: Fact> {
    falsified: DashSet<F>,
}

impl<F: Fact> SharedFactStore<F> {
    pub fn new() -> Self { Self { falsified: DashSet::new() } }

    pub fn len(&self) -> usize { self.falsified.len() }

    pub fn is_empty(&self) -> bool { self.falsified.is_empty() }

    /// Sorted copy of every falsified fact.
    pub fn snapshot(&self) -> Vec<F> {
        let mut facts: Vec<F> = self.falsified.iter().map(|f| f.key().clone()).collect();
        facts.sort();
        facts
    }
}

impl<F: Fact> Default for SharedFactStore<F> {
    fn default() -> Self { Self::new() }
}

impl<F: Fact> FactStore<F> for SharedFactStore<F> {
    fn mark_falsified(&self, fact: &F) -> bool { self.falsified.insert(fact.clone()) }

    fn is_falsified(&self, fact: &F) -> bool { self.falsified.contains(fact) }
}
