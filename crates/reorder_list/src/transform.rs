//! Position transform engine
//!
//! Pure functions deciding where each cell sits while a drag is in
//! progress. Everything here works in content coordinates along the list
//! axis; the engine converts to and from viewport coordinates.

/// How a cell is displaced relative to its natural slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellShift {
    /// At its natural position
    #[default]
    Rest,
    /// The lifted cell itself; rendered invisible in place
    Active,
    /// Moved toward the start by one active-cell size
    Backward,
    /// Moved toward the end by one active-cell size
    Forward,
}

impl CellShift {
    /// Translation along the axis for a lifted cell of `active_size`
    pub fn translation(&self, active_size: f32) -> f32 {
        match self {
            CellShift::Rest | CellShift::Active => 0.0,
            CellShift::Backward => -active_size,
            CellShift::Forward => active_size,
        }
    }
}

/// Classify the cell at `cell` for a drag of `active` hovering over `spacer`
///
/// Cells between the two close the gap left by the lifted cell: the
/// spacer's own cell moves, the active cell never does.
pub fn classify(active: usize, spacer: usize, cell: usize) -> CellShift {
    if cell == active {
        CellShift::Active
    } else if active < cell && cell <= spacer {
        CellShift::Backward
    } else if spacer <= cell && cell < active {
        CellShift::Forward
    } else {
        CellShift::Rest
    }
}

/// A measured cell's natural slot along the axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub index: usize,
    pub offset: f32,
    pub size: f32,
}

impl Slot {
    pub fn end(&self) -> f32 {
        self.offset + self.size
    }

    pub fn contains(&self, position: f32) -> bool {
        position >= self.offset && position < self.end()
    }
}

/// Index of the slot the hover midpoint `mid` is over
///
/// `slots` must be sorted by index and hold only measured cells. A
/// midpoint before the first row maps to 0, past the last row to
/// `count - 1`. Over an unmeasured gap, including rows outside the mounted
/// window, the `previous` spacer is kept.
pub fn spacer_index_for(mid: f32, slots: &[Slot], count: usize, previous: usize) -> usize {
    let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
        return previous;
    };
    if mid < first.offset {
        return if first.index == 0 { 0 } else { previous };
    }
    if mid >= last.end() {
        return if last.index + 1 >= count {
            count.saturating_sub(1)
        } else {
            previous
        };
    }
    slots
        .iter()
        .find(|slot| slot.contains(mid))
        .map_or(previous, |slot| slot.index)
}

/// Content offset where the lifted cell would land if dropped at `spacer`
///
/// Moving toward the start the lifted cell takes the spacer cell's leading
/// edge. Moving toward the end it ends flush with the spacer cell's
/// trailing edge, which has shifted back by `active_size`.
pub fn placeholder_offset(active: usize, spacer: &Slot, active_size: f32) -> f32 {
    if spacer.index <= active {
        spacer.offset
    } else {
        spacer.end() - active_size
    }
}
