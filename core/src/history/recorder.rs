//! Message-passing owner of a thread tree.
//!
//! Instead of attaching to shared nodes directly, workers send their finished step to a single
//! task that owns the tree and performs every attachment itself.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::{FalsifiedTime, ThreadEvent, TimeId, WorkerId};
use crate::{config::HistoryConfig, error::RecorderError, fact::Fact};

/// A worker's contribution, addressed to the event it started from.
pub struct ThreadReport<F: Fact> {
    pub parent: TimeId,
    pub terminal: FalsifiedTime<F>,
    pub worker: WorkerId,
}

enum Command<F: Fact> {
    Report(ThreadReport<F>, oneshot::Sender<Result<ThreadEvent<F>, RecorderError>>),
    Shutdown(oneshot::Sender<ThreadEvent<F>>),
}

/// Cloneable handle through which workers report to the recorder task.
pub struct RecorderHandle<F: Fact> {
    root: TimeId,
    sender: mpsc::Sender<Command<F>>,
}

impl<F: Fact> Clone for RecorderHandle<F> {
    fn clone(&self) -> Self { Self { root: self.root, sender: self.sender.clone() } }
}

/// Spawn the recorder task on the current tokio runtime, taking ownership of `root`.
pub fn spawn<F: Fact>(root: ThreadEvent<F>, config: &HistoryConfig) -> (RecorderHandle<F>, tokio::task::JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel(config.recorder_capacity.max(1));
    let handle = RecorderHandle { root: root.id(), sender };
    let task = tokio::spawn(Recorder::new(root).run(receiver));
    (handle, task)
}

struct Recorder<F: Fact> {
    root: ThreadEvent<F>,
    events: HashMap<TimeId, ThreadEvent<F>>,
}

impl<F: Fact> Recorder<F> {
    fn new(root: ThreadEvent<F>) -> Self {
        let mut events = HashMap::new();
        events.insert(root.id(), root.clone());
        for layer in root.time().descendant_layers() {
            for node in layer {
                if let Some(event) = ThreadEvent::from_time(&node) {
                    events.insert(event.id(), event);
                }
            }
        }
        Self { root, events }
    }

    async fn run(mut self, mut receiver: mpsc::Receiver<Command<F>>) {
        debug!(root = %self.root, "recorder started");
        while let Some(command) = receiver.recv().await {
            match command {
                Command::Report(report, reply) => {
                    let result = self.attach(report);
                    let _ = reply.send(result);
                }
                Command::Shutdown(reply) => {
                    let _ = reply.send(self.root.clone());
                    break;
                }
            }
        }
        debug!(root = %self.root, events = self.events.len(), "recorder stopped");
    }

    fn attach(&mut self, report: ThreadReport<F>) -> Result<ThreadEvent<F>, RecorderError> {
        let Some(parent) = self.events.get(&report.parent) else {
            warn!(worker = %report.worker, parent = %report.parent, "report for unknown parent");
            return Err(RecorderError::UnknownParent(report.parent.to_string()));
        };
        let event = ThreadEvent::new(parent, report.terminal, report.worker);
        self.events.insert(event.id(), event.clone());
        Ok(event)
    }
}

impl<F: Fact> RecorderHandle<F> {
    /// Id of the root event the recorder owns.
    pub fn root(&self) -> TimeId { self.root }

    pub async fn report(&self, parent: TimeId, terminal: FalsifiedTime<F>, worker: impl Into<WorkerId>) -> Result<ThreadEvent<F>, RecorderError> {
        let (reply, response) = oneshot::channel();
        let report = ThreadReport { parent, terminal, worker: worker.into() };
        self.sender.send(Command::Report(report, reply)).await?;
        response.await?
    }

    /// Report from a plain OS thread. Must not be called from within an async context.
    pub fn report_blocking(&self, parent: TimeId, terminal: FalsifiedTime<F>, worker: impl Into<WorkerId>) -> Result<ThreadEvent<F>, RecorderError> {
        let (reply, response) = oneshot::channel();
        let report = ThreadReport { parent, terminal, worker: worker.into() };
        self.sender.blocking_send(Command::Report(report, reply))?;
        response.blocking_recv()?
    }

    /// Stop the recorder once the reports queued ahead of this call are attached, and return
    /// the root of the finished tree.
    pub async fn shutdown(self) -> Result<ThreadEvent<F>, RecorderError> {
        let (reply, response) = oneshot::channel();
        self.sender.send(Command::Shutdown(reply)).await?;
        Ok(response.await?)
    }
}
