use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use super::{FalsifiedTime, Time, TimeId, TimeKind};
use crate::{action_debug, fact::Fact};

/// Opaque worker name, used for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    /// Name of the calling OS thread, or its numeric id when it is unnamed.
    pub fn current() -> Self {
        let thread = std::thread::current();
        match thread.name() {
            Some(name) => Self(name.to_string()),
            None => Self(format!("{:?}", thread.id())),
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for WorkerId {
    fn from(name: &str) -> Self { Self(name.to_string()) }
}

impl From<String> for WorkerId {
    fn from(name: String) -> Self { Self(name) }
}

/// The point at which a worker stopped because it found a solving step.
///
/// Children are the events of workers that started from the state this event produced.
/// Any number of finishing workers may attach under the same event at once; none of their
/// attachments is lost and siblings keep arrival order.
#[derive(Clone)]
pub struct ThreadEvent<F: Fact> {
    time: Arc<Time<F>>,
    worker: WorkerId,
    terminal: FalsifiedTime<F>,
}

impl<F: Fact> ThreadEvent<F> {
    /// The root of a thread tree: the worker that produced the initial state with `terminal`.
    pub fn root(terminal: FalsifiedTime<F>, worker: impl Into<WorkerId>) -> Self {
        let worker = worker.into();
        action_debug!(worker, "root thread event", "{}", terminal);
        let time = Time::attach(None, TimeKind::Thread { worker: worker.clone(), terminal: terminal.clone() });
        Self { time, worker, terminal }
    }

    /// Record that `worker` finished with `terminal`, attaching under `parent` immediately.
    pub fn new(parent: &ThreadEvent<F>, terminal: FalsifiedTime<F>, worker: impl Into<WorkerId>) -> Self {
        let worker = worker.into();
        action_debug!(worker, "attach", "{} under {:#}", terminal, parent.id());
        let time = Time::attach(Some(&parent.time), TimeKind::Thread { worker: worker.clone(), terminal: terminal.clone() });
        Self { time, worker, terminal }
    }

    /// View a history node as a thread event, if it is one.
    pub fn from_time(time: &Arc<Time<F>>) -> Option<Self> {
        match time.kind() {
            TimeKind::Thread { worker, terminal } => Some(Self { time: time.clone(), worker: worker.clone(), terminal: terminal.clone() }),
            _ => None,
        }
    }

    pub fn id(&self) -> TimeId { self.time.id() }

    pub fn time(&self) -> &Arc<Time<F>> { &self.time }

    pub fn worker(&self) -> &WorkerId { &self.worker }

    /// The step this worker found.
    pub fn terminal(&self) -> &FalsifiedTime<F> { &self.terminal }

    pub fn parent(&self) -> Option<ThreadEvent<F>> { self.time.parent().and_then(|p| Self::from_time(&p)) }

    pub fn children(&self) -> Vec<ThreadEvent<F>> { self.time.children().iter().filter_map(Self::from_time).collect() }

    /// Search this event's subtree, generation by generation.
    pub fn find(&self, id: TimeId) -> Option<ThreadEvent<F>> {
        if self.id() == id {
            return Some(self.clone());
        }
        self.time.descendant_layers().into_iter().flatten().find(|node| node.id() == id).and_then(|node| Self::from_time(&node))
    }

    /// Total number of events in this subtree, this one included.
    pub fn subtree_len(&self) -> usize { 1 + self.time.descendant_layers().iter().map(Vec::len).sum::<usize>() }
}

impl<F: Fact> PartialEq for ThreadEvent<F> {
    fn eq(&self, other: &Self) -> bool { self.time.id() == other.time.id() }
}

impl<F: Fact> Eq for ThreadEvent<F> {}

impl<F: Fact> fmt::Display for ThreadEvent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let falsified = self.terminal.facts().len();
        write!(f, "ThreadEvent({:#}, worker={}, falsified={}, children={})", self.id(), self.worker(), falsified, self.time.child_count())
    }
}

impl<F: Fact> fmt::Debug for ThreadEvent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(self, f) }
}
