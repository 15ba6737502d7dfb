//! Drag session state
//!
//! A session lifts one cell, follows the pointer with a hover element and
//! ends by settling, committing and resetting. Phases move through a small
//! transition table driven by
//! [`drag_events`](reorder_core::events::drag_events).

use reorder_core::events::drag_events::{DRAG_START, GESTURE_RELEASE, RESET};
use reorder_core::{CellKey, EventType, GestureState};

// ============================================================================
// Phases
// ============================================================================

/// Lifecycle phase of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No cell is lifted
    #[default]
    Idle,
    /// A cell is lifted and follows the pointer
    Dragging,
    /// The pointer let go; settling, then waiting for the commit
    Releasing,
}

impl DragPhase {
    /// Apply a [`drag_events`](reorder_core::events::drag_events) event, returning the next phase if it changes
    pub fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (DragPhase::Idle, DRAG_START) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, GESTURE_RELEASE) => Some(DragPhase::Releasing),
            (DragPhase::Dragging, RESET) => Some(DragPhase::Idle),
            (DragPhase::Releasing, RESET) => Some(DragPhase::Idle),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragPhase::Idle)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Values that live for one drag
///
/// `active_index` and `spacer_index` are both `None` exactly when no drag
/// is in progress.
#[derive(Debug)]
pub struct DragSession<H> {
    phase: DragPhase,
    pub active_key: Option<CellKey>,
    pub active_index: Option<usize>,
    pub spacer_index: Option<usize>,
    pub hover: Option<H>,
    /// Pointer position along the axis, viewport coordinates
    pub touch_absolute: f32,
    /// Pointer offset from the lifted cell's leading edge
    pub touch_cell_offset: f32,
    /// Difference between the pointer and the sample at gesture activation
    pub activation_distance: f32,
    pub active_cell_size: f32,
    pub has_moved: bool,
    /// Set on release; further gesture input is ignored
    pub disabled: bool,
    pub pressed: bool,
    pub gesture_state: GestureState,
}

impl<H> Default for DragSession<H> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            active_key: None,
            active_index: None,
            spacer_index: None,
            hover: None,
            touch_absolute: 0.0,
            touch_cell_offset: 0.0,
            activation_distance: 0.0,
            active_cell_size: 0.0,
            has_moved: false,
            disabled: false,
            pressed: false,
            gesture_state: GestureState::Undetermined,
        }
    }
}

impl<H> DragSession<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Feed `event` through the phase table
    ///
    /// Returns false when the event does not apply in the current phase.
    pub fn transition(&mut self, event: EventType) -> bool {
        match self.phase.on_event(event) {
            Some(next) => {
                tracing::trace!(from = ?self.phase, to = ?next, event, "drag phase");
                self.phase = next;
                true
            }
            None => false,
        }
    }

    /// A cell is lifted, regardless of phase
    pub fn is_hovering(&self) -> bool {
        self.active_index.is_some()
    }

    /// Lift `key` at `index`
    ///
    /// `cell_offset` is the cell's leading edge in viewport coordinates.
    pub fn begin(&mut self, key: CellKey, index: usize, hover: H, cell_offset: f32, size: f32) -> bool {
        if !self.transition(DRAG_START) {
            return false;
        }
        self.active_key = Some(key);
        self.active_index = Some(index);
        self.spacer_index = Some(index);
        self.hover = Some(hover);
        self.touch_absolute = cell_offset;
        self.touch_cell_offset = 0.0;
        self.active_cell_size = size;
        self.has_moved = false;
        self.disabled = false;
        self.pressed = true;
        true
    }

    /// Hover element position along the axis, before clamping
    pub fn hover_unclamped(&self) -> f32 {
        self.touch_absolute - self.touch_cell_offset
    }

    /// Hover element position along the axis in viewport coordinates
    ///
    /// Kept inside `[0, container - active size]` unless `overflow`.
    pub fn hover_position(&self, container_size: f32, overflow: bool) -> f32 {
        let position = self.hover_unclamped();
        if overflow {
            return position;
        }
        let max = (container_size - self.active_cell_size).max(0.0);
        position.clamp(0.0, max)
    }

    /// Capture the offset between the pointer and `sample_position`
    pub fn activate(&mut self, sample_position: f32) {
        self.activation_distance = self.touch_absolute - sample_position;
    }

    /// Follow the pointer to `sample_position`
    pub fn follow(&mut self, sample_position: f32) {
        self.has_moved = true;
        self.touch_absolute = sample_position + self.activation_distance;
    }

    /// Return every drag value to idle, handing back the hover element
    pub fn reset(&mut self) -> Option<H> {
        self.transition(RESET);
        let hover = self.hover.take();
        *self = Self::default();
        hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        assert_eq!(DragPhase::Idle.on_event(DRAG_START), Some(DragPhase::Dragging));
        assert_eq!(
            DragPhase::Dragging.on_event(GESTURE_RELEASE),
            Some(DragPhase::Releasing)
        );
        assert_eq!(DragPhase::Releasing.on_event(RESET), Some(DragPhase::Idle));
        assert_eq!(DragPhase::Dragging.on_event(RESET), Some(DragPhase::Idle));

        assert_eq!(DragPhase::Dragging.on_event(DRAG_START), None);
        assert_eq!(DragPhase::Releasing.on_event(DRAG_START), None);
        assert_eq!(DragPhase::Idle.on_event(GESTURE_RELEASE), None);
    }

    #[test]
    fn test_begin_rejects_second_drag() {
        let mut session = DragSession::new();
        assert!(session.begin(CellKey::from("a"), 0, "hover-a", 0.0, 50.0));
        assert!(!session.begin(CellKey::from("b"), 1, "hover-b", 50.0, 50.0));
        assert_eq!(session.active_index, Some(0));
        assert_eq!(session.hover, Some("hover-a"));
    }

    #[test]
    fn test_indices_set_together() {
        let mut session = DragSession::new();
        assert_eq!((session.active_index, session.spacer_index), (None, None));
        session.begin(CellKey::from("a"), 2, (), 100.0, 50.0);
        assert_eq!((session.active_index, session.spacer_index), (Some(2), Some(2)));
        session.reset();
        assert_eq!((session.active_index, session.spacer_index), (None, None));
        assert!(session.phase().is_idle());
    }

    #[test]
    fn test_follow_uses_activation_distance() {
        let mut session = DragSession::new();
        session.begin(CellKey::from("a"), 1, (), 50.0, 50.0);
        session.activate(70.0);
        assert_eq!(session.activation_distance, -20.0);

        session.follow(100.0);
        assert!(session.has_moved);
        assert_eq!(session.hover_unclamped(), 80.0);
    }

    #[test]
    fn test_hover_clamping() {
        let mut session = DragSession::new();
        session.begin(CellKey::from("a"), 0, (), 0.0, 50.0);
        session.follow(-40.0);
        assert_eq!(session.hover_position(200.0, false), 0.0);
        assert_eq!(session.hover_position(200.0, true), -40.0);

        session.follow(400.0);
        assert_eq!(session.hover_position(200.0, false), 150.0);
    }

    #[test]
    fn test_reset_returns_hover() {
        let mut session = DragSession::new();
        session.begin(CellKey::from("a"), 0, "hover", 0.0, 50.0);
        session.gesture_state = GestureState::End;
        assert_eq!(session.reset(), Some("hover"));
        assert!(session.hover.is_none());
        assert!(!session.pressed);
        assert!(!session.has_moved);
        assert_eq!(session.gesture_state, GestureState::Undetermined);
    }
}
