//! Tunables for graph queries and the history recorder.

use serde::{Deserialize, Serialize};

/// Default bound on reports queued for the history recorder before workers wait.
pub const DEFAULT_RECORDER_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Highest adjacency power `distance` will try. `None` means the vertex count,
    /// which is always enough to find any connected pair.
    pub distance_limit: Option<usize>,
}

impl GraphConfig {
    /// The exclusive upper bound on matrix exponents for a graph of `vertex_count` vertices.
    pub fn power_bound(&self, vertex_count: usize) -> usize {
        match self.distance_limit {
            Some(limit) => limit.saturating_add(1).min(vertex_count),
            None => vertex_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Capacity of the channel feeding the recorder task.
    pub recorder_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self { Self { recorder_capacity: DEFAULT_RECORDER_CAPACITY } }
}
