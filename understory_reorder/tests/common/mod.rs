// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the integration tests.

#![allow(dead_code, reason = "Not every test binary uses every fixture.")]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Point};
use understory_reorder::{
    DraggableItems, DraggableRange, ItemId, RenderedItem, ReorderConfig, ReorderListener,
    ReorderManager, ReorderSource, StripViewport,
};

/// Rows identified by `u64`, with optional drag restrictions.
#[derive(Debug, Default)]
pub struct Rows {
    pub ids: Vec<u64>,
    pub moves: Vec<(usize, usize)>,
    pub range: Option<(usize, usize)>,
    pub locked: Vec<u64>,
}

impl Rows {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl ReorderSource for Rows {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        self.ids.get(position).copied().map(ItemId)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.moves.push((from, to));
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
    }

    fn draggable(&self) -> Option<&dyn DraggableItems> {
        Some(self)
    }
}

impl DraggableItems for Rows {
    fn can_start_drag(&self, item: &RenderedItem, _position: usize, _local: Point) -> bool {
        item.item_id.is_some_and(|id| !self.locked.contains(&id.0))
    }

    fn draggable_range(&self, _item: &RenderedItem, _position: usize) -> Option<DraggableRange> {
        self.range
            .map(|(start, end)| DraggableRange::new(start, end).expect("fixture range"))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Started(usize),
    Finished(usize, usize, bool),
}

#[derive(Clone, Debug, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }
}

impl ReorderListener for Recorder {
    fn on_drag_started(&mut self, position: usize) {
        self.0.borrow_mut().push(Event::Started(position));
    }

    fn on_drag_finished(&mut self, from: usize, to: usize, committed: bool) {
        self.0.borrow_mut().push(Event::Finished(from, to, committed));
    }
}

pub type Manager = ReorderManager<Rows, StripViewport>;

pub struct Fixture {
    pub manager: Manager,
    pub viewport: StripViewport,
    pub recorder: Recorder,
}

impl Fixture {
    fn build(rows: Rows, config: ReorderConfig, viewport: StripViewport) -> Self {
        let mut manager = Manager::with_config(rows, config);
        let recorder = Recorder::default();
        manager.set_listener(Box::new(recorder.clone()));
        let mut viewport = viewport;
        viewport.sync(manager.adapter());
        Self {
            manager,
            viewport,
            recorder,
        }
    }

    /// Five 40px rows with ids 10..=14, laid out at y = 400..600 in a 1000px
    /// viewport, well away from the autoscroll zones.
    pub fn centered(rows: Rows, config: ReorderConfig) -> Self {
        let viewport = StripViewport::new(200.0, 1000.0)
            .with_default_extent(40.0)
            .with_padding(Insets::new(0.0, 400.0, 0.0, 0.0));
        Self::build(rows, config, viewport)
    }

    pub fn five() -> Self {
        Self::centered(Rows::new(10..15), ReorderConfig::default())
    }

    /// `n` 40px rows starting at the top of a 400px viewport.
    pub fn scrolling(n: u64) -> Self {
        let viewport = StripViewport::new(200.0, 400.0).with_default_extent(40.0);
        Self::build(Rows::new(0..n), ReorderConfig::default(), viewport)
    }

    /// Five 40px rows exactly filling a 200px viewport.
    pub fn snug() -> Self {
        let viewport = StripViewport::new(200.0, 200.0).with_default_extent(40.0);
        Self::build(Rows::new(0..5), ReorderConfig::default(), viewport)
    }

    pub fn down(&mut self, y: f64, t: u64) -> bool {
        self.manager
            .on_pointer_down(&mut self.viewport, Point::new(10.0, y), t)
    }

    pub fn drag_to(&mut self, y: f64, t: u64) -> bool {
        self.manager
            .on_pointer_move(&mut self.viewport, Point::new(10.0, y), t)
            .expect("pointer move")
    }

    pub fn frame(&mut self, t: u64) -> bool {
        self.manager
            .on_frame(&mut self.viewport, t)
            .expect("frame")
    }

    pub fn up(&mut self) -> bool {
        self.manager.on_pointer_up(&mut self.viewport)
    }

    pub fn source_ids(&self) -> Vec<u64> {
        self.manager.source().ids.clone()
    }

    pub fn display_ids(&self) -> Vec<u64> {
        self.viewport.order().iter().map(|id| id.0).collect()
    }
}
