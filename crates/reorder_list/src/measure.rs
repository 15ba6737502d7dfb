//! Cell measurement store
//!
//! One record per cell key, created the first time the cell mounts and kept
//! across unmounts so a recycled view reuses its record and spring. Geometry
//! is written as a whole; a record is either unmeasured or carries both its
//! size and offset.

use reorder_animation::{SpringConfig, SpringId, SpringScheduler};
use reorder_core::CellKey;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::host::{MeasureResult, MeasureTicket};
use crate::transform::CellShift;

/// Measurement replies collected in one poll
pub type Replies = SmallVec<[(CellKey, MeasureResult); 4]>;

new_key_type! {
    pub struct CellId;
}

/// Size and offset of a cell along the list axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellGeometry {
    pub size: f32,
    pub offset: f32,
}

/// Everything the engine tracks about one cell
#[derive(Debug)]
pub struct CellRecord {
    pub key: CellKey,
    pub geometry: Option<CellGeometry>,
    /// Index in the flattened sequence as of the last registry rebuild
    pub current_index: Option<usize>,
    pub mounted: bool,
    pub shift: CellShift,
    pub spring: SpringId,
    in_flight: Option<MeasureTicket>,
}

impl CellRecord {
    pub fn is_measuring(&self) -> bool {
        self.in_flight.is_some()
    }
}

/// Offset to store for a measurement taken at `raw_offset`
///
/// `collapsed` is the lifted cell at `active` with `active_size`, present
/// only when the view reports cells after it without its space. Adding it
/// back keeps every stored offset in the list's natural layout.
pub fn compensated_offset(
    raw_offset: f32,
    index: Option<usize>,
    collapsed: Option<(usize, f32)>,
) -> f32 {
    match (index, collapsed) {
        (Some(index), Some((active, active_size))) if index > active => raw_offset + active_size,
        _ => raw_offset,
    }
}

/// Store of per-cell records keyed by cell key
#[derive(Debug, Default)]
pub struct CellStore {
    cells: SlotMap<CellId, CellRecord>,
    by_key: FxHashMap<CellKey, CellId>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` mounted, creating its record and shift spring on first use
    pub fn mount(
        &mut self,
        key: &CellKey,
        index: Option<usize>,
        springs: &mut SpringScheduler,
        config: SpringConfig,
    ) -> CellId {
        if let Some(&id) = self.by_key.get(key) {
            if let Some(record) = self.cells.get_mut(id) {
                record.mounted = true;
                record.current_index = index;
                return id;
            }
        }
        let spring = springs.add_resting(config, 0.0);
        let id = self.cells.insert(CellRecord {
            key: key.clone(),
            geometry: None,
            current_index: index,
            mounted: true,
            shift: CellShift::Rest,
            spring,
            in_flight: None,
        });
        self.by_key.insert(key.clone(), id);
        id
    }

    /// Mark `key` torn down
    ///
    /// The record stays for reuse; any pending measurement is discarded.
    pub fn unmount(&mut self, key: &str) {
        if let Some(record) = self.get_mut(key) {
            record.mounted = false;
            record.in_flight = None;
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellRecord> {
        self.by_key.get(key).and_then(|&id| self.cells.get(id))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CellRecord> {
        let id = *self.by_key.get(key)?;
        self.cells.get_mut(id)
    }

    pub fn geometry(&self, key: &str) -> Option<CellGeometry> {
        self.get(key).and_then(|r| r.geometry)
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.get(key).is_some_and(|r| r.mounted)
    }

    /// Store a successful measurement
    pub fn set_geometry(&mut self, key: &str, geometry: CellGeometry) {
        if let Some(record) = self.get_mut(key) {
            record.geometry = Some(geometry);
        }
    }

    /// Track an outstanding measurement for `key`
    ///
    /// Returns false, dropping `ticket`, when one is already outstanding or
    /// the cell is not mounted.
    pub fn begin_measure(&mut self, key: &str, ticket: MeasureTicket) -> bool {
        match self.get_mut(key) {
            Some(record) if record.mounted && record.in_flight.is_none() => {
                record.in_flight = Some(ticket);
                true
            }
            _ => false,
        }
    }

    /// Collect every outstanding measurement that has resolved
    pub fn poll_replies(&mut self) -> Replies {
        let mut replies = Replies::new();
        for (_, record) in self.cells.iter_mut() {
            let Some(ticket) = record.in_flight.as_mut() else {
                continue;
            };
            if let Some(result) = ticket.poll() {
                record.in_flight = None;
                replies.push((record.key.clone(), result));
            }
        }
        replies
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellRecord> {
        self.cells.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CellRecord> {
        self.cells.values_mut()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
