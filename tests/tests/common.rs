use tracing::Level;

use deduce_core::{graph::Vertex, Graph, Wrap};

/// A candidate digit in a cell of a 9x9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Claim {
    pub cell: u8,
    pub digit: u8,
}

impl Claim {
    pub fn new(cell: u8, digit: u8) -> Self { Self { cell, digit } }
    pub fn row(&self) -> u8 { self.cell / 9 }
    pub fn col(&self) -> u8 { self.cell % 9 }
    pub fn block(&self) -> u8 { (self.row() / 3) * 3 + self.col() / 3 }

    /// Same digit in a shared row, column or block.
    pub fn sees(&self, other: &Claim) -> bool {
        self.digit == other.digit
            && self.cell != other.cell
            && (self.row() == other.row() || self.col() == other.col() || self.block() == other.block())
    }
}

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

/// Chain `1 - 2 - ... - n` plus `isolated` unconnected vertices numbered after it.
#[allow(unused)]
pub fn chain_with_isolated(n: u32, isolated: u32) -> Graph<Wrap<u32>> {
    let ids: Vec<u32> = (1..=n + isolated).collect();
    Wrap::pairwise(ids, |a, b| *a <= n && *b <= n && a.abs_diff(*b) == 1)
}

#[allow(unused)]
pub fn find<T: Eq + std::hash::Hash>(graph: &Graph<Wrap<T>>, payload: &T) -> Wrap<T> {
    graph.iter().find(|w| w.payload() == payload).cloned().expect("payload is in the graph")
}

#[allow(unused)]
pub fn payloads<T: Clone + Eq + std::hash::Hash>(graph: &Graph<Wrap<T>>) -> Vec<T> { graph.iter().map(|w| w.payload().clone()).collect() }

/// Assert that every neighbour of every vertex lies in the same graph.
#[allow(unused)]
pub fn assert_closed<V: Vertex + std::fmt::Debug>(graph: &Graph<V>) {
    for vertex in graph {
        for neighbor in vertex.neighbors() {
            assert!(graph.contains(&neighbor), "{vertex:?} links to {neighbor:?} outside the component");
        }
    }
}
