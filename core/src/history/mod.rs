//! Causal history of a solve.
//!
//! Two trees are built from the same [`Time`] node type:
//!
//! - the step tree, where each [`FalsifiedTime`] records the facts a solving step newly
//!   eliminated, deduplicated against everything its ancestors already eliminated;
//! - the thread tree, where each [`ThreadEvent`] marks a worker that stopped after finding a
//!   step, attached under the event whose state it started from.
//!
//! Recording a step is the only way facts are retired, and the only way a worker's
//! contribution enters the shared history.

mod falsified;
pub mod recorder;
mod thread;
mod time;

pub use falsified::{Falsification, FalsifiedTime};
pub use recorder::{RecorderHandle, ThreadReport};
pub use thread::{ThreadEvent, WorkerId};
pub use time::{Time, TimeId, TimeKind};
