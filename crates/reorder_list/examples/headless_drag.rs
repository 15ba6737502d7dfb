//! Headless drag simulation
//!
//! Run with:
//! `cargo run -p reorder_list --example headless_drag`
//!
//! Drives a reorderable list without any UI: a tiny in-memory list view
//! answers measurements one frame late and scrolls instantly, while a
//! scripted pointer lifts a task and drags it past the bottom edge.

use std::sync::{Arc, Mutex};

use reorder_list::{
    CellKey, CellRect, GestureState, ListHost, MeasureReply, MeasureTicket, PointerSample,
    ReorderConfig, ReorderList, Result, Row, Section,
};

const DT: f32 = 1.0 / 60.0;
const ROW: f32 = 44.0;
const VIEWPORT: f32 = 220.0;

/// In-memory list view with fixed-height rows
struct MemoryView {
    order: Vec<String>,
    lifted: Option<String>,
    pending: Vec<(MeasureReply, Option<CellRect>)>,
    scroll: Option<f32>,
}

impl MemoryView {
    fn rect_for(&self, key: &str) -> Option<CellRect> {
        let mut y = 0.0;
        for k in &self.order {
            if k == key {
                return Some(CellRect::new(0.0, y, 360.0, ROW));
            }
            if self.lifted.as_deref() != Some(k.as_str()) {
                y += ROW;
            }
        }
        None
    }

    /// Deliver last frame's measurements and scroll
    fn flush(&mut self) -> Option<f32> {
        for (reply, rect) in self.pending.drain(..) {
            reply.send(rect.ok_or(reorder_list::MeasureError::ContainerUnavailable));
        }
        self.scroll.take()
    }
}

impl ListHost for MemoryView {
    type Hover = String;

    fn measure_cell(&mut self, key: &CellKey) -> MeasureTicket {
        let (reply, ticket) = MeasureTicket::pending();
        self.pending.push((reply, self.rect_for(key.as_str())));
        ticket
    }

    fn scroll_to_offset(&mut self, offset: f32) {
        self.scroll = Some(offset);
    }

    fn lift_cell(&mut self, key: Option<&CellKey>) {
        self.lifted = key.map(CellKey::to_string);
    }

    fn collapses_lifted_cell(&self) -> bool {
        true
    }
}

fn key_of(row: &Row<&'static str, &'static str>, _index: usize) -> CellKey {
    match row {
        Row::Header(title) => CellKey::from(format!("section:{title}")),
        Row::Item(task) => CellKey::from(*task),
    }
}

fn frame(list: &mut ReorderList<&'static str, &'static str, MemoryView>, max_offset: f32) {
    if let Some(offset) = list.host_mut().flush() {
        list.on_scroll(0.0, offset.min(max_offset));
    }
    list.tick(DT);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let sections = vec![
        Section::new("today", vec!["Write tests", "Review PR", "Ship release"]),
        Section::new("later", vec!["Refactor config", "Update docs", "Plan sprint"]),
    ];

    let dropped = Arc::new(Mutex::new(None));
    let dropped_in = dropped.clone();

    let view = MemoryView {
        order: Vec::new(),
        lifted: None,
        pending: Vec::new(),
        scroll: None,
    };
    let mut list = ReorderList::builder(view)
        .config(ReorderConfig::default().with_debug(true))
        .key_extractor(key_of)
        .sections(sections)
        .on_placeholder_index_change(|index| tracing::info!(index, "placeholder moved"))
        .on_drag_end(move |params| {
            let order: Vec<_> = params.data.iter().filter_map(Row::as_item).copied().collect();
            tracing::info!(from = params.from, to = params.to, ?order, "drag ended");
            if let Ok(mut slot) = dropped_in.lock() {
                *slot = Some((params.from, params.to));
            }
            params.completion.resolve();
        })
        .build()?;

    let keys: Vec<String> = list
        .registry()
        .keys()
        .iter()
        .map(CellKey::to_string)
        .collect();
    let content = keys.len() as f32 * ROW;
    let max_offset = (content - VIEWPORT).max(0.0);
    list.host_mut().order = keys.clone();
    list.on_container_layout(360.0, VIEWPORT);
    list.on_content_size_change(360.0, content);
    for key in &keys {
        list.on_cell_mount(key);
        list.on_cell_layout(key);
    }
    for _ in 0..3 {
        frame(&mut list, max_offset);
    }

    // long-press "Write tests", then drag it down against the bottom edge
    let start = ROW * 1.5;
    list.start_drag("Write tests", "Write tests (lifted)".to_string());
    list.on_gesture_state(PointerSample::new(20.0, start, GestureState::Began));
    list.on_gesture_state(PointerSample::new(20.0, start, GestureState::Active));

    let mut y = start;
    while y < VIEWPORT {
        y += 6.0;
        list.on_gesture_move(PointerSample::new(20.0, y, GestureState::Active));
        frame(&mut list, max_offset);
    }
    for _ in 0..30 {
        list.on_gesture_move(PointerSample::new(20.0, y, GestureState::Active));
        frame(&mut list, max_offset);
    }

    list.on_gesture_state(PointerSample::new(20.0, y, GestureState::End));
    let mut frames = 0;
    while list.is_hovering() && frames < 600 {
        frame(&mut list, max_offset);
        frames += 1;
    }

    let order: Vec<_> = list
        .sequence()
        .iter()
        .filter_map(Row::as_item)
        .copied()
        .collect();
    tracing::info!(
        frames,
        scroll = list.scroll_offset(),
        dropped = ?dropped.lock().ok().and_then(|d| *d),
        ?order,
        "settled"
    );
    Ok(())
}
