//! Reorder Core
//!
//! Foundational types shared by the drag-and-reorder engine:
//!
//! - **Keys**: stable cell identity independent of position
//! - **Registry**: key → index mapping rebuilt from the flattened sequence
//! - **Sequences**: sectioned data flattened into headers and items
//! - **Events**: gesture states, pointer samples, and drag transition events
//! - **Tasks**: a deferred queue drained once per frame
//!
//! # Example
//!
//! ```rust
//! use reorder_core::{CellKey, FlatSequence, KeyRegistry, Row, Section};
//!
//! let sections = vec![Section::new("fruit", vec!["apple", "pear"])];
//! let rows = FlatSequence::flatten(&sections);
//!
//! let mut registry = KeyRegistry::new();
//! registry.rebuild(rows.iter(), |row: &Row<&str, &str>, _| match row {
//!     Row::Header(h) => CellKey::from(format!("h:{h}")),
//!     Row::Item(i) => CellKey::from(*i),
//! });
//!
//! assert_eq!(registry.lookup(&CellKey::from("pear")), Some(2));
//! ```

pub mod error;
pub mod events;
pub mod registry;
pub mod sequence;
pub mod tasks;

pub use error::{MeasureError, ReorderError, Result};
pub use events::{Axis, EventType, GestureState, PointerSample};
pub use registry::{CellKey, KeyRegistry};
pub use sequence::{keys_changed, FlatSequence, Row, Section};
pub use tasks::TaskQueue;
