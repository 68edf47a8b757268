use std::collections::HashSet;

use super::{Graph, Vertex};

/// Grows a single connected component outward from a seed, one hop per step.
///
/// The component is held as three concentric rings: `core` (fully expanded), `edge` (discovered
/// but not yet expanded) and `cutting_edge` (discovered by the latest growth step). Vertices not
/// yet claimed by any component of the current discovery pass live in the shared `unassigned`
/// pool. Between steps every vertex of the graph is in exactly one of the four.
///
/// Single-use and single-threaded: drive it with `contract(); grow();` until
/// [`is_complete`](Self::is_complete), then `contract()` once more to fold the last ring.
pub struct ConnectedComponent<'a, V: Vertex> {
    graph: &'a Graph<V>,
    unassigned: &'a mut Vec<V>,
    core: HashSet<V>,
    edge: HashSet<V>,
    cutting_edge: HashSet<V>,
    hops: usize,
}

impl<'a, V: Vertex> ConnectedComponent<'a, V> {
    pub fn new(graph: &'a Graph<V>, unassigned: &'a mut Vec<V>) -> Self {
        let capacity = graph.len();
        Self {
            graph,
            unassigned,
            core: HashSet::with_capacity(capacity),
            edge: HashSet::with_capacity(capacity),
            cutting_edge: HashSet::with_capacity(capacity),
            hops: 0,
        }
    }

    /// Put a vertex on the cutting edge unless it is already in `core` or `edge`.
    /// Vertices outside the owning graph are ignored.
    pub fn add(&mut self, vertex: V) -> bool {
        if self.core.contains(&vertex) || self.edge.contains(&vertex) || !self.graph.contains(&vertex) {
            return false;
        }
        self.cutting_edge.insert(vertex)
    }

    /// Advance one hop: every neighbour of the current `edge` joins the cutting edge, and the
    /// cutting edge is withdrawn from the unassigned pool.
    pub fn grow(&mut self) {
        let frontier: Vec<V> = self.edge.iter().flat_map(|v| v.neighbors()).collect();
        for neighbor in frontier {
            self.add(neighbor);
        }
        if !self.cutting_edge.is_empty() {
            let claimed = &self.cutting_edge;
            self.unassigned.retain(|v| !claimed.contains(v));
            self.hops += 1;
        }
        tracing::trace!(hops = self.hops, core = self.core.len(), edge = self.edge.len(), cutting = self.cutting_edge.len(), "component grew");
    }

    /// Fold `edge` into `core` and promote the cutting edge to be the new `edge`.
    pub fn contract(&mut self) -> &HashSet<V> {
        self.core.extend(self.edge.drain());
        std::mem::swap(&mut self.edge, &mut self.cutting_edge);
        &self.core
    }

    /// True once a growth step discovered nothing new.
    pub fn is_complete(&self) -> bool { self.cutting_edge.is_empty() }

    pub fn core(&self) -> &HashSet<V> { &self.core }

    pub fn edge(&self) -> &HashSet<V> { &self.edge }

    pub fn cutting_edge(&self) -> &HashSet<V> { &self.cutting_edge }

    /// Number of growth steps that found new vertices: the seed's eccentricity within its component.
    pub fn hops(&self) -> usize { self.hops }

    /// Size of `core ∪ edge ∪ cutting_edge`.
    pub fn claimed(&self) -> usize { self.core.len() + self.edge.len() + self.cutting_edge.len() }

    /// Seed, grow to completion, and return the member set.
    pub fn discover(mut self, seed: V) -> HashSet<V> {
        self.add(seed);
        self.contract();
        self.grow();
        while !self.is_complete() {
            self.contract();
            self.grow();
        }
        self.contract();
        self.into_members()
    }

    pub fn into_members(self) -> HashSet<V> { self.core }
}
