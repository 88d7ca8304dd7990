use std::time::Instant;

use crate::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// Re-applies a folder label that the host may drop on first attach.
    ReassertLabel { group: NodeId, label: String },
}

/// Fire-and-forget tasks run by `FolderEngine::tick` once their deadline passes.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<(Instant, DeferredTask)>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, at: Instant, task: DeferredTask) {
        self.tasks.push((at, task));
    }

    /// Removes and returns due tasks in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.tasks.len());
        for (at, task) in self.tasks.drain(..) {
            if at <= now {
                due.push(task);
            } else {
                pending.push((at, task));
            }
        }
        self.tasks = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/deferred.rs"]
mod tests;
