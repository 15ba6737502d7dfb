//! Caller-supplied callbacks and the drag-end hand-off

use reorder_core::{PointerSample, Row};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Callback receiving a flattened index
pub type IndexCallback = Box<dyn FnMut(usize) + Send>;
/// Callback receiving a scroll offset
pub type OffsetCallback = Box<dyn FnMut(f32) + Send>;
/// Callback receiving raw pointer samples
pub type MoveCallback = Box<dyn FnMut(&PointerSample) + Send>;
/// Callback receiving the result of a completed reorder
pub type DragEndCallback<K, T> = Box<dyn FnMut(DragEndParams<K, T>) + Send>;

/// Everything the caller needs to apply a reorder to its own data
#[derive(Debug)]
pub struct DragEndParams<K, T> {
    /// Flattened index the item was lifted from
    pub from: usize,
    /// Flattened index the item was dropped at
    pub to: usize,
    /// Flattened rows before the move
    pub before_changes: Vec<Row<K, T>>,
    /// Flattened rows after the move
    pub data: Vec<Row<K, T>>,
    /// Resolve once the caller's data reflects the new order
    pub completion: DragCompletion,
}

/// Signals that the caller finished applying a reorder
///
/// Dropping it without calling [`resolve`](Self::resolve) also releases
/// the engine, so a callback that ignores it never wedges the list.
#[derive(Debug)]
pub struct DragCompletion {
    tx: oneshot::Sender<()>,
}

impl DragCompletion {
    pub(crate) fn channel() -> (Self, CommitWait) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, CommitWait { rx })
    }

    pub fn resolve(self) {
        let _ = self.tx.send(());
    }
}

/// Engine side of a [`DragCompletion`]
#[derive(Debug)]
pub(crate) struct CommitWait {
    rx: oneshot::Receiver<()>,
}

impl CommitWait {
    /// True once the completion resolved or was dropped
    pub(crate) fn poll(&mut self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }
}

/// Optional notifications fired by the engine
pub struct ReorderCallbacks<K, T> {
    pub on_drag_begin: Option<IndexCallback>,
    pub on_release: Option<IndexCallback>,
    pub on_drag_end: Option<DragEndCallback<K, T>>,
    pub on_scroll_offset_change: Option<OffsetCallback>,
    pub on_placeholder_index_change: Option<IndexCallback>,
    pub on_move: Option<MoveCallback>,
}

impl<K, T> Default for ReorderCallbacks<K, T> {
    fn default() -> Self {
        Self {
            on_drag_begin: None,
            on_release: None,
            on_drag_end: None,
            on_scroll_offset_change: None,
            on_placeholder_index_change: None,
            on_move: None,
        }
    }
}

impl<K, T> ReorderCallbacks<K, T> {
    pub(crate) fn drag_begin(&mut self, index: usize) {
        if let Some(cb) = self.on_drag_begin.as_mut() {
            cb(index);
        }
    }

    pub(crate) fn release(&mut self, index: usize) {
        if let Some(cb) = self.on_release.as_mut() {
            cb(index);
        }
    }

    pub(crate) fn scroll_offset_change(&mut self, offset: f32) {
        if let Some(cb) = self.on_scroll_offset_change.as_mut() {
            cb(offset);
        }
    }

    pub(crate) fn placeholder_index_change(&mut self, index: usize) {
        if let Some(cb) = self.on_placeholder_index_change.as_mut() {
            cb(index);
        }
    }

    pub(crate) fn pointer_move(&mut self, sample: &PointerSample) {
        if let Some(cb) = self.on_move.as_mut() {
            cb(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_resolves() {
        let (completion, mut wait) = DragCompletion::channel();
        assert!(!wait.poll());
        completion.resolve();
        assert!(wait.poll());
    }

    #[test]
    fn test_dropped_completion_counts_as_resolved() {
        let (completion, mut wait) = DragCompletion::channel();
        drop(completion);
        assert!(wait.poll());
    }

    #[test]
    fn test_missing_callbacks_are_no_ops() {
        let mut callbacks: ReorderCallbacks<(), ()> = ReorderCallbacks::default();
        callbacks.drag_begin(0);
        callbacks.release(0);
        callbacks.scroll_offset_change(1.0);
    }
}
