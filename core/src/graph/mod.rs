//! Generic graph over vertex-like objects: connected components, hop distances and shortest
//! paths.
//!
//! A vertex is anything that can name its neighbours. A [`Graph`] owns an ordered,
//! duplicate-free list of such vertices and answers queries over the adjacency they expose.
//! Splitting a graph into components never mutates it; each component is a new `Graph`.

mod branch;
pub mod component;
pub mod matrix;
pub mod seed;
pub mod wrap;

use std::{
    collections::{HashMap, HashSet, VecDeque},
    hash::Hash,
};

use tracing::debug;

use crate::{config::GraphConfig, error::GraphError};
use branch::Branches;

pub use component::ConnectedComponent;
pub use matrix::BoolMatrix;
pub use seed::{PopLast, SeedSelector};
pub use wrap::Wrap;

/// Returned by [`Graph::distance`] when no path joins the two vertices.
pub const NO_CONNECTION: i64 = -1;

/// Anything that can take part in a graph by exposing its adjacent vertices.
///
/// Vertices are handles: cloning one must be cheap and must yield an equal vertex. Neighbour
/// lists are not owned; they may alias vertices held by other graphs.
pub trait Vertex: Clone + Eq + Hash {
    fn neighbors(&self) -> Vec<Self>;
}

/// An ordered, duplicate-free collection of vertices.
#[derive(Clone)]
pub struct Graph<V: Vertex> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
}

impl<V: Vertex> Graph<V> {
    /// Build a graph over existing vertices. Later duplicates are dropped; the first
    /// occurrence keeps its position.
    pub fn new(vertices: impl IntoIterator<Item = V>) -> Self {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for vertex in vertices {
            if index.contains_key(&vertex) {
                continue;
            }
            index.insert(vertex.clone(), ordered.len());
            ordered.push(vertex);
        }
        Self { vertices: ordered, index }
    }

    pub fn len(&self) -> usize { self.vertices.len() }

    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, V> { self.vertices.iter() }

    pub fn vertices(&self) -> &[V] { &self.vertices }

    pub fn contains(&self, vertex: &V) -> bool { self.index.contains_key(vertex) }

    pub fn index_of(&self, vertex: &V) -> Option<usize> { self.index.get(vertex).copied() }

    /// Neighbours of `vertex` that are members of this graph.
    fn member_neighbors(&self, vertex: &V) -> impl Iterator<Item = V> + '_ {
        vertex.neighbors().into_iter().filter(move |n| self.contains(n))
    }

    /// Number of undirected edges between members.
    pub fn edge_count(&self) -> usize { self.adjacency_matrix().upper_count() }

    /// Symmetric adjacency matrix in vertex order. Links to non-members are ignored.
    pub fn adjacency_matrix(&self) -> BoolMatrix {
        let mut matrix = BoolMatrix::new(self.len());
        for (i, vertex) in self.vertices.iter().enumerate() {
            for neighbor in self.member_neighbors(vertex) {
                if let Some(j) = self.index_of(&neighbor) {
                    matrix.set(i, j, true);
                    matrix.set(j, i, true);
                }
            }
        }
        matrix
    }

    /// Discover the component containing a seed chosen from `unassigned`.
    ///
    /// Every vertex of the returned component is withdrawn from `unassigned`. Returns `None`
    /// when the pool is exhausted.
    pub fn component(&self, unassigned: &mut Vec<V>, selector: &mut impl SeedSelector<V>) -> Result<Option<Graph<V>>, GraphError> {
        let before = unassigned.len();
        let Some(seed) = selector.select(unassigned) else {
            return Ok(None);
        };
        if !self.contains(&seed) {
            return Err(GraphError::InvalidArgument(format!("seed is not a member of this graph ({} vertices)", self.len())));
        }
        if unassigned.len() == before {
            // the selector left its choice in the pool, or chose an already assigned vertex
            let Some(position) = unassigned.iter().position(|v| *v == seed) else {
                return Err(GraphError::InvalidArgument(format!("seed is not in the unassigned pool ({} left)", unassigned.len())));
            };
            unassigned.swap_remove(position);
        }

        let members = ConnectedComponent::new(self, unassigned).discover(seed);
        Ok(Some(self.subgraph(&members)))
    }

    /// Partition the graph into its connected components, in discovery order.
    ///
    /// Fails if the selector hands back a vertex that is not a member, or one that is already
    /// part of a discovered component.
    pub fn connected_components(&self, mut selector: impl SeedSelector<V>) -> Result<Vec<Graph<V>>, GraphError> {
        let mut unassigned = self.vertices.clone();
        let mut components = Vec::new();
        while let Some(component) = self.component(&mut unassigned, &mut selector)? {
            components.push(component);
        }
        debug!(vertices = self.len(), components = components.len(), "connected components discovered");
        Ok(components)
    }

    /// [`connected_components`](Self::connected_components) with the [`PopLast`] selector.
    pub fn connected_components_default(&self) -> Result<Vec<Graph<V>>, GraphError> { self.connected_components(PopLast) }

    /// Hop distance between two members: the number of edges on a shortest path, 0 for the
    /// same vertex, or [`NO_CONNECTION`].
    pub fn distance(&self, v1: &V, v2: &V) -> Result<i64, GraphError> { self.distance_with(&GraphConfig::default(), v1, v2) }

    /// Like [`distance`](Self::distance), trying adjacency powers only up to the configured limit.
    pub fn distance_with(&self, config: &GraphConfig, v1: &V, v2: &V) -> Result<i64, GraphError> {
        if v1 == v2 {
            return Ok(0);
        }
        let (Some(i), Some(j)) = (self.index_of(v1), self.index_of(v2)) else {
            return Err(GraphError::InvalidArgument("distance requested for a vertex outside the graph".to_string()));
        };

        let adjacency = self.adjacency_matrix();
        let bound = config.power_bound(self.len());
        let mut power = adjacency.clone();
        for exponent in 1..bound {
            if power.get(i, j) {
                return Ok(exponent as i64);
            }
            power = power.multiply(&adjacency);
        }
        Ok(NO_CONNECTION)
    }

    /// The vertices of a shortest path from `v1` to `v2`, both included.
    ///
    /// Searches breadth-first backwards from `v2`, so the first branch to reach `v1` is a
    /// shortest one and tracing it back to the root yields the path in forward order.
    pub fn path(&self, v1: &V, v2: &V) -> Result<Vec<V>, GraphError> {
        if !self.contains(v1) || !self.contains(v2) {
            return Err(GraphError::InvalidState("path endpoints must both be members of the graph".to_string()));
        }
        if v1 == v2 {
            return Ok(vec![v1.clone()]);
        }

        let mut unvisited: HashSet<&V> = self.vertices.iter().collect();
        unvisited.remove(v2);
        let mut branches = Branches::with_capacity(self.len());
        let mut frontier = VecDeque::from([branches.root(v2.clone())]);

        while !frontier.is_empty() {
            let mut next = VecDeque::new();
            for from in frontier {
                let current = branches.vertex(from).clone();
                for neighbor in self.member_neighbors(&current) {
                    if !unvisited.remove(&neighbor) {
                        continue;
                    }
                    let reached = branches.extend(from, neighbor.clone());
                    if neighbor == *v1 {
                        return Ok(branches.trace(reached));
                    }
                    next.push_back(reached);
                }
            }
            frontier = next;
        }

        Err(GraphError::NotFound(format!("no path between vertices {} and {}", self.index[v1], self.index[v2])))
    }

    fn subgraph(&self, members: &HashSet<V>) -> Graph<V> { Graph::new(self.vertices.iter().filter(|v| members.contains(*v)).cloned()) }
}

impl<V: Vertex> FromIterator<V> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self { Graph::new(iter) }
}

impl<'a, V: Vertex> IntoIterator for &'a Graph<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter { self.vertices.iter() }
}

impl<V: Vertex> std::fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Graph({} vertices, {} edges)", self.len(), self.edge_count())
    }
}

impl<V: Vertex + std::fmt::Debug> std::fmt::Debug for Graph<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_list().entries(self.vertices.iter()).finish() }
}
