//! The reorderable list engine
//!
//! [`ReorderList`] owns the flattened data, the cell measurement store,
//! the drag session, autoscroll and settle animation. The host forwards
//! layout, scroll and gesture notifications and calls [`ReorderList::tick`]
//! once per display frame; everything that depends on time or on an
//! asynchronous answer advances there.
//!
//! # Frame order
//!
//! 1. Deferred tasks queued before this frame run (measurements)
//! 2. Resolved measurement replies are applied
//! 3. Stale autoscroll requests are abandoned
//! 4. Spacer, placeholder and cell shifts follow the hover element
//! 5. Cell springs advance
//! 6. The settle spring advances; coming to rest commits the drop
//! 7. A pending commit completion is polled

use reorder_animation::{Spring, SpringScheduler};
use reorder_core::events::drag_events::GESTURE_RELEASE;
use reorder_core::{
    keys_changed, Axis, CellKey, FlatSequence, GestureState, KeyRegistry, PointerSample,
    ReorderError, Result, Row, Section, TaskQueue,
};

use crate::autoscroll::{AutoscrollController, EdgeParams};
use crate::callbacks::{CommitWait, DragCompletion, DragEndParams, ReorderCallbacks};
use crate::config::ReorderConfig;
use crate::host::{ListHost, MeasureResult};
use crate::measure::{compensated_offset, CellGeometry, CellStore};
use crate::session::{DragPhase, DragSession};
use crate::settle::SettleAnimator;
use crate::transform::{classify, placeholder_offset, spacer_index_for, CellShift, Slot};

/// Derives a cell key from a row and its flattened index
pub type KeyExtractor<K, T> = Box<dyn Fn(&Row<K, T>, usize) -> CellKey + Send>;

/// Work deferred to the next frame
#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    /// Measure every mounted cell
    MeasureAll,
    Measure(CellKey),
    /// Measure whatever key sits at this index when the task runs
    MeasureIndex(usize),
}

/// How the host should draw one cell this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellTransform {
    /// Translation along the list axis
    pub translate: f32,
    /// The cell is lifted and must be invisible in place
    pub hidden: bool,
}

/// Settings for the pan recognizer attached to drag handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub axis: Axis,
    pub hit_slop: f32,
    /// Movement along `axis` the recognizer tolerates before activating
    pub active_offset: (f32, f32),
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ReorderList`]
pub struct ReorderListBuilder<K, T, L: ListHost> {
    host: L,
    config: ReorderConfig,
    key_extractor: Option<KeyExtractor<K, T>>,
    callbacks: ReorderCallbacks<K, T>,
    sections: Vec<Section<K, T>>,
    layout_key: Option<String>,
}

impl<K: Clone, T: Clone, L: ListHost> ReorderListBuilder<K, T, L> {
    pub fn new(host: L) -> Self {
        Self {
            host,
            config: ReorderConfig::default(),
            key_extractor: None,
            callbacks: ReorderCallbacks::default(),
            sections: Vec::new(),
            layout_key: None,
        }
    }

    pub fn config(mut self, config: ReorderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key extractor (required)
    pub fn key_extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Row<K, T>, usize) -> CellKey + Send + 'static,
    {
        self.key_extractor = Some(Box::new(extractor));
        self
    }

    pub fn sections(mut self, sections: Vec<Section<K, T>>) -> Self {
        self.sections = sections;
        self
    }

    pub fn layout_invalidation_key(mut self, key: impl Into<String>) -> Self {
        self.layout_key = Some(key.into());
        self
    }

    pub fn on_drag_begin<F: FnMut(usize) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_drag_begin = Some(Box::new(f));
        self
    }

    pub fn on_release<F: FnMut(usize) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_release = Some(Box::new(f));
        self
    }

    pub fn on_drag_end<F: FnMut(DragEndParams<K, T>) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_drag_end = Some(Box::new(f));
        self
    }

    pub fn on_scroll_offset_change<F: FnMut(f32) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_scroll_offset_change = Some(Box::new(f));
        self
    }

    pub fn on_placeholder_index_change<F: FnMut(usize) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_placeholder_index_change = Some(Box::new(f));
        self
    }

    pub fn on_move<F: FnMut(&PointerSample) + Send + 'static>(mut self, f: F) -> Self {
        self.callbacks.on_move = Some(Box::new(f));
        self
    }

    /// Build the list
    ///
    /// Fails with [`ReorderError::MissingKeyExtractor`] when no key
    /// extractor was given.
    pub fn build(self) -> Result<ReorderList<K, T, L>> {
        let key_extractor = self
            .key_extractor
            .ok_or(ReorderError::MissingKeyExtractor)?;

        let mut list = ReorderList {
            settle: SettleAnimator::new(self.config.animation),
            config: self.config,
            key_extractor,
            callbacks: self.callbacks,
            host: self.host,
            sections: self.sections,
            sequence: FlatSequence::default(),
            registry: KeyRegistry::new(),
            layout_key: self.layout_key,
            cells: CellStore::new(),
            springs: SpringScheduler::new(),
            tasks: TaskQueue::new(),
            session: DragSession::new(),
            autoscroll: AutoscrollController::new(),
            commit: None,
            container_size: 0.0,
            content_size: 0.0,
            scroll_offset: 0.0,
            placeholder_offset: None,
        };
        list.rebuild();
        tracing::debug!(rows = list.sequence.len(), "reorder list built");
        Ok(list)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Drag-and-reorder engine for a sectioned, virtualized list
pub struct ReorderList<K, T, L: ListHost> {
    config: ReorderConfig,
    key_extractor: KeyExtractor<K, T>,
    callbacks: ReorderCallbacks<K, T>,
    host: L,

    sections: Vec<Section<K, T>>,
    sequence: FlatSequence<K, T>,
    registry: KeyRegistry,
    layout_key: Option<String>,

    cells: CellStore,
    springs: SpringScheduler,
    tasks: TaskQueue<Task>,

    session: DragSession<L::Hover>,
    settle: SettleAnimator,
    autoscroll: AutoscrollController,
    commit: Option<CommitWait>,

    container_size: f32,
    content_size: f32,
    scroll_offset: f32,
    /// Content offset where the lifted cell would land
    placeholder_offset: Option<f32>,
}

impl<K: Clone, T: Clone, L: ListHost> ReorderList<K, T, L> {
    pub fn builder(host: L) -> ReorderListBuilder<K, T, L> {
        ReorderListBuilder::new(host)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ReorderConfig) {
        self.springs.set_config(config.animation);
        self.settle.set_config(config.animation);
        self.config = config;
    }

    pub fn host(&self) -> &L {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut L {
        &mut self.host
    }

    /// Sections as last passed to the builder or [`set_data`](Self::set_data)
    ///
    /// A committed drop reorders [`sequence`](Self::sequence) only. The
    /// caller receives the new order in `on_drag_end` and hands it back
    /// through `set_data`; until then the two disagree.
    pub fn sections(&self) -> &[Section<K, T>] {
        &self.sections
    }

    /// Headers and items in display order
    pub fn sequence(&self) -> &FlatSequence<K, T> {
        &self.sequence
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.registry.lookup(key)
    }

    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    pub fn active_key(&self) -> Option<&CellKey> {
        self.session.active_key.as_ref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.session.active_index
    }

    pub fn spacer_index(&self) -> Option<usize> {
        self.session.spacer_index
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.session
            .active_key
            .as_ref()
            .is_some_and(|active| active.as_str() == key)
    }

    /// A cell is lifted
    pub fn is_hovering(&self) -> bool {
        self.session.is_hovering()
    }

    /// The hover element supplied to [`start_drag`](Self::start_drag)
    pub fn hover(&self) -> Option<&L::Hover> {
        self.session.hover.as_ref()
    }

    pub fn cell_geometry(&self, key: &str) -> Option<CellGeometry> {
        self.cells.geometry(key)
    }

    pub fn cell_transform(&self, key: &str) -> CellTransform {
        let translate = self
            .cells
            .get(key)
            .and_then(|record| self.springs.get_spring(record.spring))
            .map_or(0.0, Spring::value);
        CellTransform {
            translate,
            hidden: self.is_active(key),
        }
    }

    /// Hover element position along the axis, viewport coordinates
    pub fn hover_translate(&self) -> Option<f32> {
        if !self.session.is_hovering() {
            return None;
        }
        if self.settle.is_running() {
            Some(self.settle.value())
        } else {
            Some(self.hover_position())
        }
    }

    pub fn hover_visible(&self) -> bool {
        self.session.is_hovering() && self.session.gesture_state != GestureState::Cancelled
    }

    /// Where the lifted cell would land, viewport coordinates
    pub fn placeholder_position(&self) -> Option<f32> {
        self.placeholder_offset.map(|offset| offset - self.scroll_offset)
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Whether the list itself may scroll right now
    pub fn list_scroll_enabled(&self) -> bool {
        !self.session.is_hovering() && self.config.scroll_enabled
    }

    pub fn gesture_config(&self) -> GestureConfig {
        let distance = self.config.activation_distance;
        GestureConfig {
            axis: self.config.axis(),
            hit_slop: self.config.drag_hit_slop,
            active_offset: (-distance, distance),
        }
    }

    pub fn autoscroll(&self) -> &AutoscrollController {
        &self.autoscroll
    }

    /// Waiting for the caller to resolve a [`DragCompletion`]
    pub fn is_committing(&self) -> bool {
        self.commit.is_some()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Springs of mounted cells are still moving
    pub fn is_animating(&self) -> bool {
        self.springs.has_active_animations() || self.settle.is_running()
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the caller's data
    ///
    /// The sequence and registry are always rebuilt. Cells are remeasured
    /// only when the key set changed.
    pub fn set_data(&mut self, sections: Vec<Section<K, T>>) {
        let extractor = &self.key_extractor;
        let structural = keys_changed(&self.sections, &sections, |row, i| extractor(row, i));
        self.sections = sections;
        self.rebuild();
        if structural {
            tracing::debug!(rows = self.sequence.len(), "structural change, remeasuring");
            self.tasks.push(Task::MeasureAll);
        }
    }

    /// Force a rebuild and a full remeasure when `key` changes
    pub fn set_layout_invalidation_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.layout_key.as_deref() == Some(key.as_str()) {
            return;
        }
        self.layout_key = Some(key);
        self.rebuild();
        self.tasks.push(Task::MeasureAll);
    }

    fn rebuild(&mut self) {
        self.sequence = FlatSequence::flatten(&self.sections);
        self.reindex();
    }

    /// Rebuild the registry from the current sequence
    fn reindex(&mut self) {
        let extractor = &self.key_extractor;
        self.registry
            .rebuild(self.sequence.iter(), |row: &Row<K, T>, i| extractor(row, i));
        for record in self.cells.iter_mut() {
            record.current_index = self.registry.lookup(record.key.as_str());
        }
    }

    // =========================================================================
    // Host notifications
    // =========================================================================

    pub fn on_container_layout(&mut self, width: f32, height: f32) {
        self.container_size = self.config.axis().pick(width, height);
    }

    pub fn on_content_size_change(&mut self, width: f32, height: f32) {
        self.content_size = self.config.axis().pick(width, height);
    }

    pub fn on_scroll(&mut self, x: f32, y: f32) {
        let offset = self.config.axis().pick(x, y);
        self.scroll_offset = offset;
        self.callbacks.scroll_offset_change(offset);

        let params = self.edge_params();
        if self
            .autoscroll
            .on_scroll(&params, self.config.scroll_position_tolerance)
        {
            self.continue_autoscroll();
        }
    }

    /// A cell for `key` was rendered
    pub fn on_cell_mount(&mut self, key: &str) {
        let key = CellKey::from(key);
        let index = self.registry.lookup(key.as_str());
        self.cells
            .mount(&key, index, &mut self.springs, self.config.animation);
    }

    /// A cell for `key` was laid out
    pub fn on_cell_layout(&mut self, key: &str) {
        if self.is_active(key) {
            return;
        }
        self.tasks.push(Task::Measure(CellKey::from(key)));
    }

    /// A cell for `key` was torn down
    pub fn on_cell_unmount(&mut self, key: &str) {
        self.cells.unmount(key);
    }

    /// Remeasure every mounted cell on the next frame
    pub fn measure_all(&mut self) {
        self.tasks.push(Task::MeasureAll);
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Lift the cell for `key`, rendering `hover` in its place
    ///
    /// Returns the cell's index, or `None` when another drag is in progress
    /// or the key is unknown.
    pub fn start_drag(&mut self, key: &str, hover: L::Hover) -> Option<usize> {
        if !self.session.phase().is_idle() || self.commit.is_some() {
            tracing::debug!(key, "a drag is already in progress");
            return None;
        }
        let Some(index) = self.registry.lookup(key) else {
            tracing::debug!(key, "no index for key");
            return None;
        };
        let key = self.registry.key_at(index)?.clone();
        let geometry = self.cells.geometry(key.as_str()).unwrap_or_default();

        if !self.session.begin(
            key.clone(),
            index,
            hover,
            geometry.offset - self.scroll_offset,
            geometry.size,
        ) {
            return None;
        }
        self.settle.reset();
        self.placeholder_offset = Some(geometry.offset);
        self.host.lift_cell(Some(&key));
        tracing::debug!(key = %key, index, "drag started");
        self.callbacks.drag_begin(index);
        Some(index)
    }

    /// The pan recognizer changed state
    pub fn on_gesture_state(&mut self, sample: PointerSample) {
        let state = sample.state;
        if state == self.session.gesture_state || self.session.disabled {
            return;
        }
        self.session.gesture_state = state;
        if state.is_active() {
            self.session.activate(sample.along(self.config.axis()));
        } else if state.is_release() {
            self.release();
        }
    }

    /// The pointer moved
    pub fn on_gesture_move(&mut self, sample: PointerSample) {
        self.callbacks.pointer_move(&sample);
        if !self.session.is_hovering()
            || !self.session.gesture_state.is_active()
            || self.session.disabled
        {
            return;
        }
        self.session.follow(sample.along(self.config.axis()));
        self.check_autoscroll();
    }

    /// The pointer left the container surface
    pub fn on_touch_end(&mut self) {
        if !self.session.pressed {
            return;
        }
        self.session.pressed = false;
        self.release();
    }

    fn release(&mut self) {
        if !self.session.is_hovering() {
            self.finish_reset();
            return;
        }
        if self.session.disabled {
            return;
        }
        let Some(index) = self.session.active_index else {
            return;
        };
        self.session.disabled = true;
        self.session.pressed = false;
        self.session.transition(GESTURE_RELEASE);
        self.callbacks.release(index);

        if !self.session.has_moved {
            tracing::debug!(index, "released without moving");
            self.finish_reset();
            return;
        }

        let from = self.hover_position();
        if self.autoscroll.is_in_flight() {
            self.settle.defer(from);
        } else {
            let target = self.placeholder_position().unwrap_or(from);
            self.settle.start(from, target);
        }
    }

    fn hover_position(&self) -> f32 {
        self.session
            .hover_position(self.container_size, self.config.drag_item_overflow)
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the engine by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for task in self.tasks.drain() {
            self.run_task(task);
        }

        for (key, result) in self.cells.poll_replies() {
            self.apply_measurement(&key, result);
        }

        self.autoscroll.expire(dt, self.config.autoscroll_timeout);

        if self.session.is_hovering() && self.commit.is_none() {
            if self.session.phase() == DragPhase::Dragging {
                self.update_spacer();
            }
            self.update_placeholder();
            self.update_cell_shifts();
        }

        self.springs.tick(dt);

        if self.session.phase() == DragPhase::Releasing && self.commit.is_none() {
            self.update_settle(dt);
        }

        if let Some(wait) = self.commit.as_mut() {
            if wait.poll() {
                self.finish_reset();
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::MeasureAll => {
                let keys: Vec<CellKey> = self
                    .registry
                    .keys()
                    .iter()
                    .filter(|key| self.cells.is_mounted(key.as_str()))
                    .cloned()
                    .collect();
                for key in keys {
                    self.measure(&key);
                }
            }
            Task::Measure(key) => self.measure(&key),
            Task::MeasureIndex(index) => {
                if let Some(key) = self.registry.key_at(index).cloned() {
                    self.measure(&key);
                }
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// The lifted cell and its size while a drag is live
    fn lifted(&self) -> Option<(usize, f32)> {
        if self.commit.is_some() {
            return None;
        }
        self.session
            .active_index
            .map(|active| (active, self.session.active_cell_size))
    }

    fn measure(&mut self, key: &CellKey) {
        match self.cells.get(key.as_str()) {
            Some(record) if record.mounted && !record.is_measuring() => {}
            _ => return,
        }
        if self.lifted().is_some() && self.is_active(key.as_str()) {
            return;
        }

        let mut ticket = self.host.measure_cell(key);
        match ticket.poll() {
            Some(result) => self.apply_measurement(key, result),
            None => {
                self.cells.begin_measure(key.as_str(), ticket);
            }
        }
    }

    fn apply_measurement(&mut self, key: &CellKey, result: MeasureResult) {
        match result {
            Ok(rect) => {
                let axis = self.config.axis();
                let lifted = self.lifted();
                let collapsed = lifted.filter(|_| self.host.collapses_lifted_cell());
                let index = self.registry.lookup(key.as_str());
                let geometry = CellGeometry {
                    size: rect.size(axis),
                    offset: compensated_offset(rect.offset(axis), index, collapsed),
                };
                self.cells.set_geometry(key.as_str(), geometry);
                if self.config.debug {
                    tracing::debug!(
                        key = %key,
                        size = geometry.size,
                        offset = geometry.offset,
                        "cell measured"
                    );
                }
                if lifted.is_some() {
                    self.tasks.push(Task::Measure(key.clone()));
                }
            }
            Err(error) => {
                if self.config.debug {
                    tracing::debug!(key = %key, %error, "measurement failed, retrying");
                }
                if self.cells.is_mounted(key.as_str()) {
                    self.tasks.push(Task::Measure(key.clone()));
                }
            }
        }
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Measured slots in sequence order
    fn slots(&self) -> Vec<Slot> {
        self.registry
            .keys()
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                self.cells.geometry(key.as_str()).map(|g| Slot {
                    index,
                    offset: g.offset,
                    size: g.size,
                })
            })
            .collect()
    }

    fn update_spacer(&mut self) {
        let Some(previous) = self.session.spacer_index else {
            return;
        };
        let mid = self.hover_position() + self.scroll_offset + self.session.active_cell_size / 2.0;
        let spacer = spacer_index_for(mid, &self.slots(), self.registry.len(), previous);
        if spacer == previous {
            return;
        }
        self.session.spacer_index = Some(spacer);
        if self.config.debug {
            tracing::debug!(previous, spacer, mid, "spacer moved");
        }
        self.callbacks.placeholder_index_change(spacer);
    }

    fn update_placeholder(&mut self) {
        let (Some(active), Some(spacer)) = (self.session.active_index, self.session.spacer_index)
        else {
            return;
        };
        let Some(geometry) = self
            .registry
            .key_at(spacer)
            .and_then(|key| self.cells.geometry(key.as_str()))
        else {
            return;
        };
        let slot = Slot {
            index: spacer,
            offset: geometry.offset,
            size: geometry.size,
        };
        self.placeholder_offset = Some(placeholder_offset(
            active,
            &slot,
            self.session.active_cell_size,
        ));
    }

    fn update_cell_shifts(&mut self) {
        let (Some(active), Some(spacer)) = (self.session.active_index, self.session.spacer_index)
        else {
            return;
        };
        let size = self.session.active_cell_size;
        for record in self.cells.iter_mut() {
            if !record.mounted {
                continue;
            }
            let Some(index) = record.current_index else {
                continue;
            };
            let shift = classify(active, spacer, index);
            if shift == record.shift {
                continue;
            }
            record.shift = shift;
            if let Some(spring) = self.springs.get_spring_mut(record.spring) {
                let (position, velocity) = (spring.value(), spring.velocity());
                spring.restart(position, velocity, shift.translation(size));
            }
        }
    }

    // =========================================================================
    // Autoscroll
    // =========================================================================

    fn edge_params(&self) -> EdgeParams {
        EdgeParams::measure(
            self.hover_position(),
            self.session.active_cell_size,
            self.container_size,
            self.content_size,
            self.scroll_offset,
            self.config.scroll_position_tolerance,
        )
    }

    fn check_autoscroll(&mut self) {
        let params = self.edge_params();
        let active = self.session.gesture_state.is_active();
        if self
            .autoscroll
            .should_trigger(&params, self.config.autoscroll_threshold, active)
            && self.autoscroll.begin()
        {
            self.continue_autoscroll();
        }
    }

    fn continue_autoscroll(&mut self) {
        let params = self.edge_params();
        let next = self.autoscroll.next_step(
            &params,
            self.session.pressed,
            self.config.autoscroll_threshold,
            self.config.effective_autoscroll_speed(),
        );
        if let Some(target) = next {
            if self.config.debug {
                tracing::debug!(from = params.scroll_offset, target, "autoscroll step");
            }
            self.host.scroll_to_offset(target);
        }
    }

    // =========================================================================
    // Release
    // =========================================================================

    fn update_settle(&mut self, dt: f32) {
        let target = self
            .placeholder_position()
            .unwrap_or_else(|| self.hover_position());
        if self.settle.is_deferred() {
            if self.autoscroll.is_in_flight() {
                return;
            }
            self.settle.resume(target);
        }
        self.settle.retarget(target);
        if self.settle.step(dt) {
            self.commit_drop();
        }
    }

    fn commit_drop(&mut self) {
        let (Some(from), Some(to)) = (self.session.active_index, self.session.spacer_index) else {
            self.finish_reset();
            return;
        };
        let before_changes = self.sequence.as_slice().to_vec();
        if from != to && self.sequence.move_row(from, to) {
            self.reindex();
        }
        self.host.lift_cell(None);

        let last = self.sequence.len().saturating_sub(1);
        let lo = from.min(to).saturating_sub(1);
        let hi = (from.max(to) + 1).min(last);
        for index in lo..=hi {
            self.tasks.push(Task::MeasureIndex(index));
        }
        tracing::debug!(from, to, "drop committed");

        if from != to {
            if let Some(on_drag_end) = self.callbacks.on_drag_end.as_mut() {
                let (completion, wait) = DragCompletion::channel();
                on_drag_end(DragEndParams {
                    from,
                    to,
                    before_changes,
                    data: self.sequence.as_slice().to_vec(),
                    completion,
                });
                self.commit = Some(wait);
                return;
            }
        }
        self.finish_reset();
    }

    /// Return every drag value to idle
    fn finish_reset(&mut self) {
        let was_hovering = self.session.is_hovering();
        self.session.reset();
        self.settle.reset();
        self.autoscroll.cancel();
        self.commit = None;
        self.placeholder_offset = None;
        for record in self.cells.iter_mut() {
            record.shift = CellShift::Rest;
            if let Some(spring) = self.springs.get_spring_mut(record.spring) {
                spring.snap_to(0.0);
            }
        }
        if was_hovering {
            self.host.lift_cell(None);
        }
    }
}
