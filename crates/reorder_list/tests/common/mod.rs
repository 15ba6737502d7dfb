//! Shared test host for the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reorder_list::{
    CellKey, CellRect, GestureState, ListHost, MeasureError, MeasureReply, MeasureTicket,
    PointerSample, ReorderConfig, ReorderList, Row, Section,
};

pub const DT: f32 = 1.0 / 60.0;
pub const ROW: f32 = 50.0;

pub type Item = &'static str;
pub type TestList = ReorderList<Item, Item, MockHost>;

/// A list view laying out fixed-size rows top to bottom
///
/// While a cell is lifted, later rows close up over its space unless
/// `lifted_in_place` is set.
#[derive(Debug, Default)]
pub struct MockHost {
    order: Vec<String>,
    sizes: HashMap<String, f32>,
    lifted: Option<String>,
    /// Keep the lifted cell's space, hiding it in place
    pub lifted_in_place: bool,
    failures: HashMap<String, usize>,
    /// Answer measurements on a later frame
    pub deferred: bool,
    pending: Vec<(MeasureReply, Option<CellRect>)>,
    pub measure_calls: Vec<String>,
    pub scroll_requests: Vec<f32>,
    /// Scroll requests not yet delivered back as scroll events
    pub outstanding: usize,
    /// A scroll request was issued while another was outstanding
    pub overlapping_requests: usize,
}

impl MockHost {
    pub fn new(order: &[&str]) -> Self {
        let mut host = Self::default();
        host.set_order(order);
        host
    }

    pub fn set_order(&mut self, order: &[&str]) {
        self.order = order.iter().map(|k| k.to_string()).collect();
    }

    pub fn set_size(&mut self, key: &str, size: f32) {
        self.sizes.insert(key.to_string(), size);
    }

    /// Fail the next `times` measurements of `key`
    pub fn fail_times(&mut self, key: &str, times: usize) {
        self.failures.insert(key.to_string(), times);
    }

    pub fn lifted(&self) -> Option<&str> {
        self.lifted.as_deref()
    }

    fn size_of(&self, key: &str) -> f32 {
        self.sizes.get(key).copied().unwrap_or(ROW)
    }

    pub fn content_size(&self) -> f32 {
        self.order.iter().map(|k| self.size_of(k)).sum()
    }

    /// Layout rect of `key` as the view currently reports it
    pub fn rect_for(&self, key: &str) -> Option<CellRect> {
        let mut offset = 0.0;
        for k in &self.order {
            let size = self.size_of(k);
            if k == key {
                return Some(CellRect::new(0.0, offset, 320.0, size));
            }
            if self.lifted_in_place || self.lifted.as_deref() != Some(k.as_str()) {
                offset += size;
            }
        }
        None
    }

    /// Resolve every deferred measurement
    pub fn answer_pending(&mut self) {
        for (reply, rect) in self.pending.drain(..) {
            reply.send(rect.ok_or(MeasureError::ContainerUnavailable));
        }
    }

    /// Fail every deferred measurement
    pub fn fail_pending(&mut self) {
        for (reply, _) in self.pending.drain(..) {
            reply.send(Err(MeasureError::Failed("view detached".into())));
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl ListHost for MockHost {
    type Hover = String;

    fn measure_cell(&mut self, key: &CellKey) -> MeasureTicket {
        self.measure_calls.push(key.to_string());
        if let Some(left) = self.failures.get_mut(key.as_str()) {
            if *left > 0 {
                *left -= 1;
                return MeasureTicket::failed(MeasureError::ContainerUnavailable);
            }
        }
        let rect = self.rect_for(key.as_str());
        if self.deferred {
            let (reply, ticket) = MeasureTicket::pending();
            self.pending.push((reply, rect));
            return ticket;
        }
        match rect {
            Some(rect) => MeasureTicket::ready(Ok(rect)),
            None => MeasureTicket::failed(MeasureError::NotMounted(key.to_string())),
        }
    }

    fn scroll_to_offset(&mut self, offset: f32) {
        if self.outstanding > 0 {
            self.overlapping_requests += 1;
        }
        self.outstanding += 1;
        self.scroll_requests.push(offset);
    }

    fn lift_cell(&mut self, key: Option<&CellKey>) {
        self.lifted = key.map(|k| k.to_string());
    }

    fn collapses_lifted_cell(&self) -> bool {
        !self.lifted_in_place
    }
}

/// Callback observations shared with the test body
#[derive(Debug, Default)]
pub struct Recorded {
    pub drag_begins: Vec<usize>,
    pub releases: Vec<usize>,
    pub drag_ends: Vec<(usize, usize)>,
    pub placeholder_indices: Vec<usize>,
    pub scroll_offsets: Vec<f32>,
    pub final_order: Vec<Item>,
    pub moves: usize,
}

pub fn key_of(row: &Row<Item, Item>, _index: usize) -> CellKey {
    match row {
        Row::Header(h) => CellKey::from(format!("h:{h}")),
        Row::Item(item) => CellKey::from(*item),
    }
}

pub fn items(rows: &[Row<Item, Item>]) -> Vec<Item> {
    rows.iter().filter_map(Row::as_item).copied().collect()
}

/// One section `list` holding `data`, with every row mounted and measured
pub fn mounted_list(
    data: &[Item],
    container: f32,
    config: ReorderConfig,
) -> (TestList, Arc<Mutex<Recorded>>) {
    let recorded = Arc::new(Mutex::new(Recorded::default()));

    let mut order = vec!["h:list"];
    order.extend_from_slice(data);
    let host = MockHost::new(&order);
    let content = host.content_size();

    let r = recorded.clone();
    let begin = move |i| r.lock().unwrap().drag_begins.push(i);
    let r = recorded.clone();
    let release = move |i| r.lock().unwrap().releases.push(i);
    let r = recorded.clone();
    let end = move |params: reorder_list::DragEndParams<Item, Item>| {
        let mut rec = r.lock().unwrap();
        rec.drag_ends.push((params.from, params.to));
        rec.final_order = items(&params.data);
        params.completion.resolve();
    };
    let r = recorded.clone();
    let placeholder = move |i| r.lock().unwrap().placeholder_indices.push(i);
    let r = recorded.clone();
    let scroll = move |offset| r.lock().unwrap().scroll_offsets.push(offset);
    let r = recorded.clone();
    let moved = move |_: &PointerSample| r.lock().unwrap().moves += 1;

    let mut list = ReorderList::builder(host)
        .config(config)
        .key_extractor(key_of)
        .sections(vec![Section::new("list", data.to_vec())])
        .on_drag_begin(begin)
        .on_release(release)
        .on_drag_end(end)
        .on_placeholder_index_change(placeholder)
        .on_scroll_offset_change(scroll)
        .on_move(moved)
        .build()
        .unwrap();

    list.on_container_layout(320.0, container);
    list.on_content_size_change(320.0, content);
    for key in order {
        list.on_cell_mount(key);
        list.on_cell_layout(key);
    }
    list.tick(DT);
    (list, recorded)
}

pub fn sample(y: f32, state: GestureState) -> PointerSample {
    PointerSample::new(0.0, y, state)
}

/// Lift `key` and activate the pan gesture with the pointer at `y`
pub fn lift(list: &mut TestList, key: &str, y: f32) -> Option<usize> {
    let index = list.start_drag(key, format!("hover:{key}"))?;
    list.on_gesture_state(sample(y, GestureState::Began));
    list.on_gesture_state(sample(y, GestureState::Active));
    Some(index)
}

pub fn move_to(list: &mut TestList, y: f32) {
    list.on_gesture_move(sample(y, GestureState::Active));
    list.tick(DT);
}

pub fn release(list: &mut TestList, y: f32) {
    list.on_gesture_state(sample(y, GestureState::End));
}

/// Tick until the drag returns to idle; returns the number of frames
pub fn run_until_idle(list: &mut TestList) -> usize {
    for frame in 1..=1200 {
        list.tick(DT);
        if !list.is_hovering() {
            return frame;
        }
    }
    panic!("drag never returned to idle");
}

/// Report the most recent scroll request back as reached, clamped to `max`
pub fn deliver_scroll(list: &mut TestList, max: f32) -> Option<f32> {
    let target = *list.host().scroll_requests.last()?;
    let reached = target.min(max);
    list.host_mut().outstanding = 0;
    list.on_scroll(0.0, reached);
    Some(reached)
}
