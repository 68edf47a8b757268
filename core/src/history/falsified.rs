use std::{collections::BTreeSet, fmt, sync::Arc};

use super::{Time, TimeId, TimeKind, WorkerId};
use crate::{
    action_debug,
    error::CausalError,
    fact::{Fact, FactStore},
    util::bracketed,
};

/// A solving step that has been checked against its ancestry but not yet recorded.
///
/// Computing a falsification is pure. Only [`commit`](Self::commit) touches the history tree
/// and the fact store, so a step can be inspected, or dropped, without side effects.
pub struct Falsification<F: Fact> {
    parent: Option<Arc<Time<F>>>,
    facts: BTreeSet<F>,
}

impl<F: Fact> Falsification<F> {
    /// Subtract everything already eliminated along `parent`'s ancestor chain from
    /// `candidates`. Fails if nothing new remains.
    pub fn compute(parent: Option<&Arc<Time<F>>>, candidates: impl IntoIterator<Item = F>) -> Result<Self, CausalError> {
        let candidates: BTreeSet<F> = candidates.into_iter().collect();
        let accounted = parent.map(|p| p.accounted()).unwrap_or_default();
        let facts: BTreeSet<F> = candidates.difference(&accounted).cloned().collect();
        if facts.is_empty() {
            return Err(CausalError::NoUnaccountedFacts { candidates: candidates.len() });
        }
        Ok(Self { parent: parent.cloned(), facts })
    }

    pub fn facts(&self) -> &BTreeSet<F> { &self.facts }

    pub fn parent(&self) -> Option<&Arc<Time<F>>> { self.parent.as_ref() }

    /// Attach the step under its parent and mark its facts falsified in `store`.
    pub fn commit<S: FactStore<F> + ?Sized>(self, store: &S) -> FalsifiedTime<F> {
        for fact in &self.facts {
            store.mark_falsified(fact);
        }
        let facts = Arc::new(self.facts);
        let time = Time::attach(self.parent.as_ref(), TimeKind::Falsified(facts.clone()));
        let step = FalsifiedTime { time, facts };
        action_debug!(step, "commit", "{}", bracketed(step.facts()));
        step
    }

    /// Like [`commit`](Self::commit), but first revalidates against the store: if a racing
    /// sibling has already retired every fact of this step, nothing is recorded.
    pub fn commit_fresh<S: FactStore<F> + ?Sized>(self, store: &S, worker: &WorkerId) -> Result<FalsifiedTime<F>, CausalError> {
        if self.facts.iter().all(|fact| store.is_falsified(fact)) {
            crate::action_warn!(worker, "stale step", "{}", bracketed(&self.facts));
            return Err(CausalError::Stale { worker: worker.clone(), facts: self.facts.len() });
        }
        Ok(self.commit(store))
    }
}

/// A recorded solving step: a history node carrying the non-empty set of facts it newly
/// eliminated. No fact in it was eliminated by any falsifying ancestor.
#[derive(Clone)]
pub struct FalsifiedTime<F: Fact> {
    time: Arc<Time<F>>,
    facts: Arc<BTreeSet<F>>,
}

impl<F: Fact> FalsifiedTime<F> {
    /// Compute and commit in one call. With no parent the step starts a new history.
    pub fn new<S: FactStore<F> + ?Sized>(parent: Option<&Arc<Time<F>>>, candidates: impl IntoIterator<Item = F>, store: &S) -> Result<Self, CausalError> {
        match Falsification::compute(parent, candidates) {
            Ok(step) => Ok(step.commit(store)),
            Err(err) => {
                action_debug!("FalsifiedTime", "rejected", "{}", err);
                Err(err)
            }
        }
    }

    /// View a history node as a step, if it is one.
    pub fn from_time(time: &Arc<Time<F>>) -> Option<Self> {
        match time.kind() {
            TimeKind::Falsified(facts) => Some(FalsifiedTime { time: time.clone(), facts: facts.clone() }),
            _ => None,
        }
    }

    pub fn id(&self) -> TimeId { self.time.id() }

    pub fn time(&self) -> &Arc<Time<F>> { &self.time }

    pub fn facts(&self) -> &BTreeSet<F> { &self.facts }

    pub fn parent(&self) -> Option<Arc<Time<F>>> { self.time.parent() }

    /// Facts eliminated by every falsifying descendant, walked one generation at a time.
    pub fn transitive_count(&self) -> usize {
        self.time.descendant_layers().iter().flatten().filter_map(|node| node.falsified()).map(|facts| facts.len()).sum()
    }
}

impl<F: Fact> PartialEq for FalsifiedTime<F> {
    fn eq(&self, other: &Self) -> bool { self.time.id() == other.time.id() }
}

impl<F: Fact> Eq for FalsifiedTime<F> {}

impl<F: Fact> fmt::Display for FalsifiedTime<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FalsifiedTime({:#}, direct={}, transitive={})", self.time.id(), self.facts().len(), self.transitive_count())
    }
}

impl<F: Fact> fmt::Debug for FalsifiedTime<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FalsifiedTime({:#}, {:?})", self.time.id(), self.facts()) }
}
