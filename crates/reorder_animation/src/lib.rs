//! Reorder Animation
//!
//! Spring physics for the drag-and-reorder engine.
//!
//! # Features
//!
//! - **Closed-form springs**: exact damped-oscillator steps for under-,
//!   critically, and overdamped configurations
//! - **Clocks**: springs advance only while started, and restart from a
//!   stopped, reseeded state
//! - **Scheduler**: slotmap-backed storage that ticks every running spring

pub mod scheduler;
pub mod spring;

pub use scheduler::{SpringId, SpringScheduler};
pub use spring::{Spring, SpringConfig, SpringState};
