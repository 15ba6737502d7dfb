//! Host integration
//!
//! The engine never touches views. The embedding list (a native scroll
//! view, an immediate-mode UI, a test double) implements [`ListHost`] to
//! answer measurement requests and perform scrolls, and forwards its
//! layout, scroll and gesture notifications to the engine.

use reorder_core::{Axis, CellKey, MeasureError};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// A cell's layout rectangle relative to the list container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Leading edge along `axis`
    pub fn offset(&self, axis: Axis) -> f32 {
        axis.pick(self.x, self.y)
    }

    /// Extent along `axis`
    pub fn size(&self, axis: Axis) -> f32 {
        axis.pick(self.width, self.height)
    }
}

/// Outcome of one measurement
pub type MeasureResult = std::result::Result<CellRect, MeasureError>;

/// Handle to a measurement that resolves now or on a later frame
#[derive(Debug)]
pub struct MeasureTicket {
    rx: oneshot::Receiver<MeasureResult>,
}

/// Sending half of a pending [`MeasureTicket`]
#[derive(Debug)]
pub struct MeasureReply {
    tx: oneshot::Sender<MeasureResult>,
}

impl MeasureTicket {
    /// A ticket whose result is already known
    pub fn ready(result: MeasureResult) -> Self {
        let (reply, ticket) = Self::pending();
        reply.send(result);
        ticket
    }

    /// A ticket answered later through the returned [`MeasureReply`]
    pub fn pending() -> (MeasureReply, Self) {
        let (tx, rx) = oneshot::channel();
        (MeasureReply { tx }, Self { rx })
    }

    /// Shorthand for a ticket that already failed
    pub fn failed(error: MeasureError) -> Self {
        Self::ready(Err(error))
    }

    /// Poll without blocking
    ///
    /// A reply dropped without an answer resolves as [`MeasureError::Dropped`].
    pub(crate) fn poll(&mut self) -> Option<MeasureResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(MeasureError::Dropped)),
        }
    }
}

impl MeasureReply {
    /// Answer the ticket. A ticket that was already discarded is ignored.
    pub fn send(self, result: MeasureResult) {
        let _ = self.tx.send(result);
    }
}

/// The view layer a [`ReorderList`](crate::ReorderList) drives
pub trait ListHost {
    /// Opaque hover element rendered in place of the lifted cell
    type Hover;

    /// Measure `key`'s rectangle relative to the list container
    ///
    /// While a cell is lifted and [`collapses_lifted_cell`] is true,
    /// rectangles of the cells after it are reported with the lifted cell's
    /// space removed.
    ///
    /// [`collapses_lifted_cell`]: ListHost::collapses_lifted_cell
    fn measure_cell(&mut self, key: &CellKey) -> MeasureTicket;

    /// Scroll the list to `offset` along its axis, without animation
    fn scroll_to_offset(&mut self, offset: f32);

    /// The cell the hover element stands in for changed
    fn lift_cell(&mut self, _key: Option<&CellKey>) {}

    /// Whether the view closes up the lifted cell's space
    ///
    /// The default keeps the lifted cell invisible in place, so layout
    /// rectangles never change while dragging.
    fn collapses_lifted_cell(&self) -> bool {
        false
    }
}
