//! Spring scheduler
//!
//! Owns every per-cell spring and advances the running ones each frame.

use crate::spring::{Spring, SpringConfig};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct SpringId;
}

/// Springs that came to rest during one tick
pub type Finished = SmallVec<[SpringId; 8]>;

/// The spring scheduler that ticks all running springs
#[derive(Default)]
pub struct SpringScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl SpringScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    /// Add a stopped spring resting at `position`
    pub fn add_resting(&mut self, config: SpringConfig, position: f32) -> SpringId {
        self.springs.insert(Spring::new(config, position))
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn get_spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Advance every running spring by `dt` seconds
    ///
    /// Springs that come to rest have their clock stopped and are returned.
    pub fn tick(&mut self, dt: f32) -> Finished {
        let mut finished = Finished::new();
        for (id, spring) in self.springs.iter_mut() {
            if spring.is_running() && spring.step(dt) {
                spring.stop();
                finished.push(id);
            }
        }
        if !finished.is_empty() {
            tracing::trace!(count = finished.len(), "springs settled");
        }
        finished
    }

    /// Check if any spring clock is still running
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| s.is_running())
    }

    /// Apply `config` to every spring
    pub fn set_config(&mut self, config: SpringConfig) {
        for (_, spring) in self.springs.iter_mut() {
            spring.set_config(config);
        }
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}
