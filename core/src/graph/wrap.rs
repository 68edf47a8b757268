//! Adapter that lets arbitrary payloads act as graph vertices.

use std::{
    borrow::Borrow,
    collections::HashSet,
    hash::{Hash, Hasher},
    sync::{Arc, RwLock, Weak},
};

use super::{Graph, Vertex};
use crate::error::GraphError;

struct WrapInner<T> {
    payload: T,
    neighbors: RwLock<Vec<Weak<WrapInner<T>>>>,
}

/// A payload promoted to a vertex.
///
/// Identity is the payload's: two wraps are equal and hash alike iff their payloads do. The
/// neighbour set never takes part, which keeps hashing finite on cyclic graphs and stable
/// while links are still being added. Links are weak; neighbours stay reachable for as long
/// as a graph holding them is alive.
pub struct Wrap<T>(Arc<WrapInner<T>>);

impl<T> Clone for Wrap<T> {
    fn clone(&self) -> Self { Wrap(self.0.clone()) }
}

impl<T: Eq + Hash> Wrap<T> {
    fn new(payload: T) -> Self { Wrap(Arc::new(WrapInner { payload, neighbors: RwLock::new(Vec::new()) })) }

    pub fn payload(&self) -> &T { &self.0.payload }

    pub fn degree(&self) -> usize { self.0.neighbors.read().expect("Failed to lock neighbors").len() }

    fn link(&self, other: &Wrap<T>) {
        self.0.neighbors.write().expect("Failed to lock neighbors").push(Arc::downgrade(&other.0));
        if !Arc::ptr_eq(&self.0, &other.0) {
            other.0.neighbors.write().expect("Failed to lock neighbors").push(Arc::downgrade(&self.0));
        }
    }

    /// Wrap every distinct payload and link each unordered pair for which `related` holds.
    ///
    /// Each pair is tested exactly once, so `related` is assumed symmetric.
    pub fn pairwise(payloads: impl IntoIterator<Item = T>, related: impl Fn(&T, &T) -> bool) -> Graph<Wrap<T>> {
        let graph = Graph::new(payloads.into_iter().map(Wrap::new));
        let vertices = graph.vertices();
        for (i, a) in vertices.iter().enumerate() {
            for b in &vertices[i + 1..] {
                if related(a.payload(), b.payload()) {
                    a.link(b);
                }
            }
        }
        tracing::trace!(vertices = graph.len(), "wrapped payloads pairwise");
        graph
    }

    /// Wrap the payloads named by an explicit edge list and link each declared edge.
    ///
    /// Every edge must contain exactly two payloads. Vertices appear in first-mention order.
    pub fn from_edges<E>(edges: impl IntoIterator<Item = E>) -> Result<Graph<Wrap<T>>, GraphError>
    where E: IntoIterator<Item = T> {
        let mut order: Vec<Wrap<T>> = Vec::new();
        let mut known: HashSet<Wrap<T>> = HashSet::new();
        let mut links = Vec::new();

        for (position, edge) in edges.into_iter().enumerate() {
            let mut endpoints = edge.into_iter();
            let (Some(a), Some(b), None) = (endpoints.next(), endpoints.next(), endpoints.next()) else {
                return Err(GraphError::InvalidArgument(format!("edge {position} does not have exactly two endpoints")));
            };
            let a = Self::intern(a, &mut known, &mut order);
            let b = Self::intern(b, &mut known, &mut order);
            links.push((a, b));
        }

        for (a, b) in &links {
            a.link(b);
        }
        tracing::trace!(vertices = order.len(), edges = links.len(), "wrapped edge list");
        Ok(Graph::new(order))
    }

    fn intern(payload: T, known: &mut HashSet<Wrap<T>>, order: &mut Vec<Wrap<T>>) -> Wrap<T> {
        if let Some(existing) = known.get(&payload) {
            return existing.clone();
        }
        let wrap = Wrap::new(payload);
        known.insert(wrap.clone());
        order.push(wrap.clone());
        wrap
    }
}

impl<T: Clone> Wrap<T> {
    /// Payloads of a path of wrapped vertices, in order.
    pub fn unwrap_all(path: &[Wrap<T>]) -> Vec<T> { path.iter().map(|w| w.0.payload.clone()).collect() }
}

impl<T: Eq + Hash> Vertex for Wrap<T> {
    fn neighbors(&self) -> Vec<Self> {
        self.0.neighbors.read().expect("Failed to lock neighbors").iter().filter_map(|n| n.upgrade().map(Wrap)).collect()
    }
}

impl<T: PartialEq> PartialEq for Wrap<T> {
    fn eq(&self, other: &Self) -> bool { self.0.payload == other.0.payload }
}

impl<T: Eq> Eq for Wrap<T> {}

impl<T: Hash> Hash for Wrap<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.payload.hash(state) }
}

impl<T> Borrow<T> for Wrap<T> {
    fn borrow(&self) -> &T { &self.0.payload }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Wrap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Wrap({:?})", self.0.payload) }
}
