// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A self-contained [`Viewport`] laying items out in a vertical strip.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Insets, Point, Rect};

use crate::{DisplayChange, DisplaySequence, HandleId, ItemId, RenderedItem, Viewport};

/// An in-memory vertical list viewport.
///
/// Items are stacked top to bottom in display order, each taking its extent
/// plus vertical margins. Every item gets a handle when it first appears;
/// [`recycle_item`](Self::recycle_item) and [`bind_item`](Self::bind_item)
/// simulate a host recycling rendered rows. Only items intersecting the
/// viewport count as rendered.
///
/// When the display reports a single-item move, the first rendered row keeps
/// its on-screen position (by identity), the way anchored list layouts
/// behave.
///
/// This is useful for tests and for hosts that draw rows themselves and only
/// need the geometry.
#[derive(Clone, Debug)]
pub struct StripViewport {
    width: f64,
    height: f64,
    padding: Insets,
    scroll_offset: f64,
    default_extent: f64,
    order: Vec<ItemId>,
    prefix_starts: Vec<f64>,
    content_extent: f64,
    extents: HashMap<ItemId, f64>,
    margins: HashMap<ItemId, Insets>,
    handles: HashMap<ItemId, HandleId>,
    next_handle: u64,
    translations: HashMap<HandleId, f64>,
    hidden: HashSet<HandleId>,
    overscroll_enabled: bool,
    exclusive_gesture: bool,
    redraw_requests: usize,
}

impl StripViewport {
    /// Creates an empty viewport of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            padding: Insets::ZERO,
            scroll_offset: 0.0,
            default_extent: 0.0,
            order: Vec::new(),
            prefix_starts: Vec::new(),
            content_extent: 0.0,
            extents: HashMap::new(),
            margins: HashMap::new(),
            handles: HashMap::new(),
            next_handle: 0,
            translations: HashMap::new(),
            hidden: HashSet::new(),
            overscroll_enabled: true,
            exclusive_gesture: false,
            redraw_requests: 0,
        }
    }

    /// Sets the content padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self.set_scroll_offset(self.scroll_offset);
        self
    }

    /// Sets the extent used for items without an explicit one.
    #[must_use]
    pub fn with_default_extent(mut self, extent: f64) -> Self {
        self.default_extent = extent.max(0.0);
        self.rebuild();
        self
    }

    /// Resizes the viewport.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Sets the extent of one item. Negative extents are clamped to zero.
    pub fn set_extent(&mut self, id: ItemId, extent: f64) {
        debug_assert!(
            extent.is_finite(),
            "StripViewport extents must be finite; got {extent:?}"
        );
        self.extents.insert(id, extent.max(0.0));
        self.rebuild();
    }

    /// Sets the layout margins of one item.
    pub fn set_margins(&mut self, id: ItemId, margins: Insets) {
        self.margins.insert(id, margins);
        self.rebuild();
    }

    /// Replaces the displayed order with `display`.
    ///
    /// New identities get fresh handles; handles of identities no longer
    /// displayed are released.
    pub fn sync(&mut self, display: &dyn DisplaySequence) {
        self.order = (0..display.len())
            .filter_map(|p| display.item_id(p))
            .collect();
        let present: HashSet<ItemId> = self.order.iter().copied().collect();
        let stale: Vec<ItemId> = self
            .handles
            .keys()
            .filter(|id| !present.contains(*id))
            .copied()
            .collect();
        for id in stale {
            self.recycle_item(id);
        }
        for id in self.order.clone() {
            self.bind_item(id);
        }
        self.rebuild();
    }

    /// Displayed identities, top to bottom.
    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Total height of all items including margins, excluding padding.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent + self.padding.y0 + self.padding.y1 - self.height).max(0.0)
    }

    /// Handle currently showing `id`.
    #[must_use]
    pub fn handle_of(&self, id: ItemId) -> Option<HandleId> {
        self.handles.get(&id).copied()
    }

    /// Translation applied to `handle`.
    #[must_use]
    pub fn translation(&self, handle: HandleId) -> f64 {
        self.translations.get(&handle).copied().unwrap_or(0.0)
    }

    /// Whether `handle` is hidden.
    #[must_use]
    pub fn is_hidden(&self, handle: HandleId) -> bool {
        self.hidden.contains(&handle)
    }

    /// Whether the viewport was asked to keep the current gesture to itself.
    #[must_use]
    pub fn exclusive_gesture(&self) -> bool {
        self.exclusive_gesture
    }

    /// Number of redraws requested so far.
    #[must_use]
    pub fn redraw_requests(&self) -> usize {
        self.redraw_requests
    }

    /// Releases the handle showing `id` and returns it.
    ///
    /// The item stops being rendered until [`bind_item`](Self::bind_item)
    /// gives it a new handle.
    pub fn recycle_item(&mut self, id: ItemId) -> Option<HandleId> {
        let handle = self.handles.remove(&id)?;
        self.translations.remove(&handle);
        self.hidden.remove(&handle);
        Some(handle)
    }

    /// Returns the handle showing `id`, allocating a fresh one if needed.
    pub fn bind_item(&mut self, id: ItemId) -> HandleId {
        if let Some(handle) = self.handles.get(&id) {
            return *handle;
        }
        let handle = HandleId(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(id, handle);
        handle
    }

    fn extent_of(&self, id: ItemId) -> f64 {
        self.extents.get(&id).copied().unwrap_or(self.default_extent)
    }

    fn margins_of(&self, id: ItemId) -> Insets {
        self.margins.get(&id).copied().unwrap_or(Insets::ZERO)
    }

    fn rebuild(&mut self) {
        let mut starts = Vec::with_capacity(self.order.len());
        let mut pos = 0.0;
        for id in &self.order {
            starts.push(pos);
            let m = self.margins_of(*id);
            pos += m.y0 + self.extent_of(*id) + m.y1;
        }
        self.prefix_starts = starts;
        self.content_extent = pos;
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Geometry of the item at `position`, whether or not it is visible.
    fn layout_item(&self, position: usize) -> Option<RenderedItem> {
        let id = *self.order.get(position)?;
        let handle = *self.handles.get(&id)?;
        let start = *self.prefix_starts.get(position)?;
        let m = self.margins_of(id);
        let y0 = self.padding.y0 + start + m.y0 - self.scroll_offset;
        let x0 = self.padding.x0 + m.x0;
        let x1 = (self.width - self.padding.x1 - m.x1).max(x0);
        Some(RenderedItem {
            handle,
            position,
            item_id: Some(id),
            bounds: Rect::new(x0, y0, x1, y0 + self.extent_of(id)),
            translation_y: self.translation(handle),
            margins: m,
            decoration: Insets::ZERO,
        })
    }

    fn rendered(&self, position: usize) -> Option<RenderedItem> {
        self.layout_item(position)
            .filter(|item| item.bounds.y1 > 0.0 && item.bounds.y0 < self.height)
    }

    fn fully_visible(&self, position: usize) -> bool {
        self.rendered(position)
            .is_some_and(|item| item.bounds.y0 >= 0.0 && item.bounds.y1 <= self.height)
    }
}

impl Viewport for StripViewport {
    /// The snapshot is the captured area, overlay padding included.
    type Snapshot = Rect;

    fn height(&self) -> f64 {
        self.height
    }

    fn padding(&self) -> Insets {
        self.padding
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0).min(self.max_scroll_offset());
    }

    fn scroll_by(&mut self, dy: f64) -> f64 {
        let before = self.scroll_offset;
        self.set_scroll_offset(before + dy);
        self.scroll_offset - before
    }

    fn first_visible_position(&self) -> Option<usize> {
        (0..self.order.len()).find(|p| self.rendered(*p).is_some())
    }

    fn last_visible_position(&self) -> Option<usize> {
        (0..self.order.len()).rev().find(|p| self.rendered(*p).is_some())
    }

    fn first_fully_visible_position(&self) -> Option<usize> {
        (0..self.order.len()).find(|p| self.fully_visible(*p))
    }

    fn last_fully_visible_position(&self) -> Option<usize> {
        (0..self.order.len()).rev().find(|p| self.fully_visible(*p))
    }

    fn item_at_point(&self, point: Point) -> Option<RenderedItem> {
        let first = self.first_visible_position()?;
        let last = self.last_visible_position()?;
        (first..=last)
            .filter_map(|p| self.rendered(p))
            .find(|item| item.bounds.contains(point))
    }

    fn item_at_position(&self, position: usize) -> Option<RenderedItem> {
        self.rendered(position)
    }

    /// Bound handles report their geometry even while scrolled out of view.
    fn item_for_handle(&self, handle: HandleId) -> Option<RenderedItem> {
        let id = self
            .handles
            .iter()
            .find_map(|(id, h)| (*h == handle).then_some(*id))?;
        let position = self.order.iter().position(|x| *x == id)?;
        self.layout_item(position)
    }

    fn first_rendered_item(&self) -> Option<RenderedItem> {
        self.first_visible_position().and_then(|p| self.rendered(p))
    }

    fn set_item_translation(&mut self, handle: HandleId, dy: f64) {
        if dy == 0.0 {
            self.translations.remove(&handle);
        } else {
            self.translations.insert(handle, dy);
        }
    }

    fn set_item_hidden(&mut self, handle: HandleId, hidden: bool) {
        if hidden {
            self.hidden.insert(handle);
        } else {
            self.hidden.remove(&handle);
        }
    }

    fn capture_snapshot(&mut self, item: &RenderedItem, overlay_padding: Insets) -> Rect {
        Rect::new(
            item.bounds.x0 - overlay_padding.x0,
            item.bounds.y0 - overlay_padding.y0,
            item.bounds.x1 + overlay_padding.x1,
            item.bounds.y1 + overlay_padding.y1,
        )
    }

    fn overscroll_enabled(&self) -> bool {
        self.overscroll_enabled
    }

    fn set_overscroll_enabled(&mut self, enabled: bool) {
        self.overscroll_enabled = enabled;
    }

    fn request_exclusive_gesture(&mut self, exclusive: bool) {
        self.exclusive_gesture = exclusive;
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn on_display_change(&mut self, change: &DisplayChange, display: &dyn DisplaySequence) {
        let anchor = match change {
            DisplayChange::ItemMoved { .. } => self
                .first_rendered_item()
                .and_then(|item| item.item_id.map(|id| (id, item.top()))),
            _ => None,
        };
        self.sync(display);
        if let Some((id, old_top)) = anchor {
            let moved = self
                .order
                .iter()
                .position(|x| *x == id)
                .and_then(|p| self.layout_item(p));
            if let Some(item) = moved {
                self.set_scroll_offset(self.scroll_offset + item.top() - old_top);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Ids(Vec<u64>);

    impl DisplaySequence for Ids {
        fn len(&self) -> usize {
            self.0.len()
        }
        fn item_id(&self, position: usize) -> Option<ItemId> {
            self.0.get(position).copied().map(ItemId)
        }
    }

    fn strip(n: u64) -> StripViewport {
        let mut vp = StripViewport::new(100.0, 100.0).with_default_extent(20.0);
        vp.sync(&Ids((0..n).collect()));
        vp
    }

    #[test]
    fn stacks_items_with_margins() {
        let mut vp = strip(3);
        vp.set_margins(ItemId(1), Insets::new(0.0, 5.0, 0.0, 5.0));
        let item = vp.item_at_position(1).unwrap();
        assert_eq!(item.bounds, Rect::new(0.0, 25.0, 100.0, 45.0));
        assert_eq!(vp.item_at_position(2).unwrap().top(), 50.0);
        assert_eq!(vp.content_extent(), 70.0);
    }

    #[test]
    fn scroll_is_clamped_and_reports_actual_distance() {
        let mut vp = strip(10);
        assert_eq!(vp.max_scroll_offset(), 100.0);
        assert_eq!(vp.scroll_by(-10.0), 0.0);
        assert_eq!(vp.scroll_by(30.0), 30.0);
        assert_eq!(vp.scroll_by(500.0), 70.0);
        assert_eq!(vp.scroll_offset(), 100.0);
    }

    #[test]
    fn visibility_queries() {
        let mut vp = strip(10);
        vp.set_scroll_offset(10.0);
        assert_eq!(vp.first_visible_position(), Some(0));
        assert_eq!(vp.first_fully_visible_position(), Some(1));
        assert_eq!(vp.last_visible_position(), Some(5));
        assert_eq!(vp.last_fully_visible_position(), Some(4));
        let hit = vp.item_at_point(Point::new(50.0, 15.0)).unwrap();
        assert_eq!(hit.item_id, Some(ItemId(1)));
        assert!(vp.item_at_position(8).is_none());
    }

    #[test]
    fn recycled_items_are_not_rendered() {
        let mut vp = strip(3);
        let old = vp.recycle_item(ItemId(1)).unwrap();
        assert!(vp.item_for_handle(old).is_none());
        assert!(vp.item_at_position(1).is_none());
        let new = vp.bind_item(ItemId(1));
        assert_ne!(old, new);
        assert_eq!(vp.item_for_handle(new).unwrap().position, 1);
    }

    #[test]
    fn moves_keep_the_first_row_anchored() {
        let mut vp = strip(10);
        vp.set_scroll_offset(30.0);
        // Row 1 is first rendered (top at -10). Moving it below row 2 keeps
        // it where it was on screen.
        let moved = Ids(vec![0, 2, 1, 3, 4, 5, 6, 7, 8, 9]);
        vp.on_display_change(&DisplayChange::ItemMoved { from: 1, to: 2 }, &moved);
        assert_eq!(vp.order()[2], ItemId(1));
        assert_eq!(vp.scroll_offset(), 50.0);
        let anchored = vp.item_for_handle(vp.handle_of(ItemId(1)).unwrap()).unwrap();
        assert_eq!(anchored.top(), -10.0);
    }

    #[test]
    fn stale_handles_are_released_on_sync() {
        let mut vp = strip(3);
        let h = vp.handle_of(ItemId(2)).unwrap();
        vp.set_item_hidden(h, true);
        vp.sync(&Ids(vec![0, 1]));
        assert!(vp.handle_of(ItemId(2)).is_none());
        assert!(!vp.is_hidden(h));
    }
}
