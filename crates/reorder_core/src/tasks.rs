//! Deferred task queue
//!
//! Side effects that must wait for the next layout pass (remeasuring after a
//! rebuild, retrying a failed measurement) are queued as plain data and
//! drained once per frame. Tasks pushed while a batch is being processed
//! land in the next frame's batch.

/// Ordered queue of deferred tasks with duplicate coalescing
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    pending: Vec<T>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T: PartialEq> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next drain
    ///
    /// Returns false if an equal task is already waiting.
    pub fn push(&mut self, task: T) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        self.pending.push(task);
        true
    }

    /// Take every task queued so far, in insertion order
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
