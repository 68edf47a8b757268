use std::{
    collections::BTreeSet,
    fmt,
    sync::{Arc, Weak},
};

use append_only_vec::AppendOnlyVec;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::{FalsifiedTime, WorkerId};
use crate::fact::Fact;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TimeId(Ulid);

impl TimeId {
    pub fn new() -> Self { TimeId(Ulid::new()) }

    pub fn to_base64(&self) -> String { general_purpose::URL_SAFE_NO_PAD.encode(self.0.to_bytes()) }

    pub fn to_base64_short(&self) -> String {
        // take the last 6 characters of the base64 encoded string
        let value = self.to_base64();
        value[value.len() - 6..].to_string()
    }
}

impl Default for TimeId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.to_base64_short())
        } else {
            write!(f, "{}", self.to_base64())
        }
    }
}

impl fmt::Debug for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "TimeId({})", self.to_base64_short()) }
}

/// What a node of the history records.
pub enum TimeKind<F: Fact> {
    /// The start of a history: nothing eliminated yet.
    Origin,
    /// A solving step, with the facts it newly eliminated.
    Falsified(Arc<BTreeSet<F>>),
    /// A worker that stopped because it found `terminal`.
    Thread { worker: WorkerId, terminal: FalsifiedTime<F> },
}

impl<F: Fact> TimeKind<F> {
    pub fn name(&self) -> &'static str {
        match self {
            TimeKind::Origin => "origin",
            TimeKind::Falsified(_) => "falsified",
            TimeKind::Thread { .. } => "thread",
        }
    }

    /// Steps hold their parent strongly so their ancestry outlives every caller handle.
    /// Everything else is held by its parent instead.
    fn owns_parent(&self) -> bool { matches!(self, TimeKind::Falsified(_)) }
}

/// One edge of the tree. Exactly one end of every edge holds the other strongly.
enum Link<F: Fact> {
    Owned(Arc<Time<F>>),
    Observed(Weak<Time<F>>),
}

impl<F: Fact> Link<F> {
    fn get(&self) -> Option<Arc<Time<F>>> {
        match self {
            Link::Owned(node) => Some(node.clone()),
            Link::Observed(node) => node.upgrade(),
        }
    }

    fn is_live(&self) -> bool {
        match self {
            Link::Owned(_) => true,
            Link::Observed(node) => node.strong_count() > 0,
        }
    }
}

/// A node of an append-only history tree.
///
/// Each node has at most one parent, fixed at construction, and a child list that other
/// threads may append to concurrently. A falsifying node owns its parent and is only observed
/// by it, so the whole ancestor chain of a live step stays alive and a step that nobody holds
/// drops out of its parent's children. Thread nodes are owned by their parent, so a thread
/// tree is walkable from its root.
pub struct Time<F: Fact> {
    id: TimeId,
    kind: TimeKind<F>,
    parent: Option<Link<F>>,
    depth: usize,
    children: AppendOnlyVec<Link<F>>,
}

impl<F: Fact> Time<F> {
    /// A fresh root.
    pub fn origin() -> Arc<Self> { Self::attach(None, TimeKind::Origin) }

    /// Create a node and append it to `parent`'s children.
    pub(crate) fn attach(parent: Option<&Arc<Time<F>>>, kind: TimeKind<F>) -> Arc<Self> {
        let upward = kind.owns_parent();
        let node = Arc::new(Time {
            id: TimeId::new(),
            kind,
            parent: parent.map(|p| if upward { Link::Owned(p.clone()) } else { Link::Observed(Arc::downgrade(p)) }),
            depth: parent.map_or(0, |p| p.depth + 1),
            children: AppendOnlyVec::new(),
        });
        if let Some(parent) = parent {
            parent.children.push(if upward { Link::Observed(Arc::downgrade(&node)) } else { Link::Owned(node.clone()) });
        }
        node
    }

    pub fn id(&self) -> TimeId { self.id }

    pub fn kind(&self) -> &TimeKind<F> { &self.kind }

    /// Distance to the root of the tree this node was created in.
    pub fn depth(&self) -> usize { self.depth }

    pub fn parent(&self) -> Option<Arc<Time<F>>> { self.parent.as_ref().and_then(Link::get) }

    /// Snapshot of the live children attached so far, in arrival order.
    pub fn children(&self) -> Vec<Arc<Time<F>>> { self.children.iter().filter_map(Link::get).collect() }

    pub fn child_count(&self) -> usize { self.children.iter().filter(|child| child.is_live()).count() }

    /// The facts this node eliminated, if it is a falsifying node.
    pub fn falsified(&self) -> Option<&BTreeSet<F>> {
        match &self.kind {
            TimeKind::Falsified(facts) => Some(facts.as_ref()),
            _ => None,
        }
    }

    /// This node followed by each of its ancestors, nearest first.
    pub fn ancestors(self: &Arc<Self>) -> Vec<Arc<Time<F>>> {
        let mut chain = vec![self.clone()];
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            cursor = node.parent();
            chain.push(node);
        }
        chain
    }

    /// Union of the facts eliminated along the ancestor chain, this node included.
    pub fn accounted(self: &Arc<Self>) -> BTreeSet<F> {
        let mut facts = BTreeSet::new();
        for node in self.ancestors() {
            if let Some(falsified) = node.falsified() {
                facts.extend(falsified.iter().cloned());
            }
        }
        facts
    }

    /// Descendants grouped by generation: children first, then grandchildren, and so on.
    pub fn descendant_layers(&self) -> Vec<Vec<Arc<Time<F>>>> {
        let mut layers = Vec::new();
        let mut layer = self.children();
        while !layer.is_empty() {
            let next: Vec<_> = layer.iter().flat_map(|node| node.children()).collect();
            layers.push(layer);
            layer = next;
        }
        layers
    }
}

impl<F: Fact> fmt::Display for Time<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({:#}, {}, depth={}, children={})", self.id, self.kind.name(), self.depth, self.child_count())
    }
}

impl<F: Fact> fmt::Debug for Time<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Time");
        s.field("id", &self.id).field("kind", &self.kind.name()).field("depth", &self.depth);
        if let Some(facts) = self.falsified() {
            s.field("falsified", facts);
        }
        s.field("children", &self.child_count()).finish()
    }
}
