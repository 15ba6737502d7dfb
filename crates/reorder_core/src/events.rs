//! Gesture and drag events
//!
//! Normalized input coming from the host's pointer recognizer, plus the
//! event identifiers that drive the drag session state machine.

/// Event type identifier
pub type EventType = u32;

/// Events that move a drag session between phases
pub mod drag_events {
    use super::EventType;

    /// A cell was lifted and a hover element created
    pub const DRAG_START: EventType = 1;
    /// The pointer was released, cancelled, or the recognizer failed
    pub const GESTURE_RELEASE: EventType = 2;
    /// All drag values returned to their idle defaults
    pub const RESET: EventType = 3;
}

/// Discrete state reported by the pointer gesture recognizer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Undetermined,
    Began,
    Active,
    End,
    Cancelled,
    Failed,
}

impl GestureState {
    /// Returns true for the states that end a gesture
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            GestureState::End | GestureState::Cancelled | GestureState::Failed
        )
    }

    /// Returns true while the recognizer is tracking movement
    pub fn is_active(&self) -> bool {
        matches!(self, GestureState::Active)
    }
}

/// Scroll axis of the list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// Pick the component of `(x, y)` that lies along this axis
    #[inline]
    pub fn pick(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }
}

/// A raw pointer sample relative to the list container
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    /// Recognizer state at the time of the sample
    pub state: GestureState,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32, state: GestureState) -> Self {
        Self { x, y, state }
    }

    /// Position of the sample along `axis`
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        axis.pick(self.x, self.y)
    }
}
