//! Release settle animation
//!
//! After the pointer lets go the hover element springs from where it was
//! dropped to the placeholder slot. The spring coming to rest is what
//! commits the reorder.

use reorder_animation::{Spring, SpringConfig};

/// Animates the hover element into its final slot
#[derive(Debug, Clone)]
pub struct SettleAnimator {
    spring: Spring,
    /// Start requested but held back
    deferred: Option<f32>,
}

impl SettleAnimator {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            spring: Spring::new(config, 0.0),
            deferred: None,
        }
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.spring.set_config(config);
    }

    /// Queue a settle from `from`; it starts on the next [`resume`](Self::resume)
    pub fn defer(&mut self, from: f32) {
        self.deferred = Some(from);
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Start a deferred settle toward `target`
    pub fn resume(&mut self, target: f32) -> bool {
        match self.deferred.take() {
            Some(from) => {
                self.start(from, target);
                true
            }
            None => false,
        }
    }

    /// Seed the spring at `from` at rest and start it toward `target`
    pub fn start(&mut self, from: f32, target: f32) {
        self.deferred = None;
        self.spring.restart(from, 0.0, target);
    }

    /// Follow a moving target without restarting
    pub fn retarget(&mut self, target: f32) {
        if self.spring.is_running() && self.spring.target() != target {
            self.spring.set_target(target);
        }
    }

    /// Advance by `dt` seconds; returns true on the frame it comes to rest
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.spring.is_running() {
            return false;
        }
        if self.spring.step(dt) {
            self.spring.stop();
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.spring.is_running()
    }

    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    /// Stop and forget any deferred start
    pub fn reset(&mut self) {
        self.deferred = None;
        self.spring.stop();
    }
}
