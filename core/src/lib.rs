//! Algorithmic substrate for a constraint solver: a generic graph engine (components,
//! distances, shortest paths) and a concurrent causal history of falsified facts.

pub mod config;
pub mod error;
pub mod fact;
pub mod graph;
pub mod history;
pub mod util;

pub use config::{GraphConfig, HistoryConfig};
pub use error::{CausalError, GraphError, RecorderError};
pub use fact::{Fact, FactStore, SharedFactStore};
pub use graph::{Graph, Vertex, Wrap, NO_CONNECTION};
pub use history::{FalsifiedTime, ThreadEvent, Time, WorkerId};
