//! Reorder List
//!
//! A headless drag-and-reorder engine for sectioned, virtualized lists.
//! The engine decides which cell is lifted, where every other cell should
//! be drawn while it moves, when to autoscroll, and how the lifted cell
//! settles into its new slot. Rendering, layout and gesture recognition
//! stay with the host, which talks to the engine through [`ListHost`] and
//! a handful of notification methods.
//!
//! # Example
//!
//! ```rust
//! use reorder_list::{CellKey, CellRect, ListHost, MeasureTicket, ReorderList, Row, Section};
//!
//! struct Rows;
//!
//! impl ListHost for Rows {
//!     type Hover = ();
//!
//!     fn measure_cell(&mut self, key: &CellKey) -> MeasureTicket {
//!         let index = key.as_str().len() as f32;
//!         MeasureTicket::ready(Ok(CellRect::new(0.0, index * 40.0, 320.0, 40.0)))
//!     }
//!
//!     fn scroll_to_offset(&mut self, _offset: f32) {}
//! }
//!
//! fn key_of(row: &Row<&'static str, &'static str>, _index: usize) -> CellKey {
//!     match row {
//!         Row::Header(h) => CellKey::from(format!("header-{h}")),
//!         Row::Item(item) => CellKey::from(*item),
//!     }
//! }
//!
//! let mut list = ReorderList::builder(Rows)
//!     .key_extractor(key_of)
//!     .sections(vec![Section::new("todo", vec!["a", "bb", "ccc"])])
//!     .build()?;
//!
//! assert_eq!(list.index_of("bb"), Some(2));
//! assert_eq!(list.start_drag("bb", ()), Some(2));
//! assert_eq!(list.start_drag("a", ()), None);
//! # Ok::<(), reorder_list::ReorderError>(())
//! ```

pub mod autoscroll;
pub mod callbacks;
pub mod config;
pub mod host;
pub mod list;
pub mod measure;
pub mod session;
pub mod settle;
pub mod transform;

pub use autoscroll::{AutoscrollController, EdgeParams, ScrollRequest};
pub use callbacks::{DragCompletion, DragEndParams, ReorderCallbacks};
pub use config::{ReorderConfig, ScrollPlatform};
pub use host::{CellRect, ListHost, MeasureReply, MeasureResult, MeasureTicket};
pub use list::{CellTransform, GestureConfig, KeyExtractor, ReorderList, ReorderListBuilder};
pub use measure::{CellGeometry, CellStore};
pub use session::{DragPhase, DragSession};
pub use settle::SettleAnimator;
pub use transform::{classify, CellShift};

pub use reorder_animation::SpringConfig;
pub use reorder_core::{
    Axis, CellKey, GestureState, MeasureError, PointerSample, ReorderError, Result, Row, Section,
};
