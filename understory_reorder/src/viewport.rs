// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scrolling container the engine drives.

use kurbo::{Insets, Point, Rect};

use crate::{DisplayChange, DisplaySequence, HandleId, ItemId};

/// A rendered item as reported by the viewport.
///
/// All geometry is in viewport coordinates, with `y = 0` at the top edge of
/// the viewport (padding included).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderedItem {
    /// Handle currently showing the item.
    pub handle: HandleId,
    /// Display position of the item.
    pub position: usize,
    /// Identity of the item, if it has one.
    pub item_id: Option<ItemId>,
    /// Laid-out bounds, without any translation applied by the engine.
    pub bounds: Rect,
    /// Vertical translation currently applied to the item.
    pub translation_y: f64,
    /// Layout margins around `bounds`.
    pub margins: Insets,
    /// Decoration insets (dividers and similar) around `bounds`.
    pub decoration: Insets,
}

impl RenderedItem {
    /// Top of the laid-out bounds.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    /// Bottom of the laid-out bounds.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }

    /// Height of the laid-out bounds.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Bounds grown by the margins.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.bounds.x0 - self.margins.x0,
            self.bounds.y0 - self.margins.y0,
            self.bounds.x1 + self.margins.x1,
            self.bounds.y1 + self.margins.y1,
        )
    }

    /// Vertical space the item occupies, margins and decoration included.
    #[must_use]
    pub fn decorated_extent(&self) -> f64 {
        self.height()
            + self.margins.y0
            + self.margins.y1
            + self.decoration.y0
            + self.decoration.y1
    }
}

/// A scrollable vertical list of rendered items.
///
/// Positions are display positions: while a drag is in progress the viewport
/// shows the order published through [`Viewport::on_display_change`], not the
/// source order.
pub trait Viewport {
    /// Opaque image of a rendered item, drawn by the host at the floating
    /// item's position.
    type Snapshot;

    /// Height of the viewport.
    fn height(&self) -> f64;

    /// Content padding.
    fn padding(&self) -> Insets;

    /// Current scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Sets the scroll offset, clamped to the scrollable extent.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Scrolls by `dy` and returns the distance actually scrolled.
    fn scroll_by(&mut self, dy: f64) -> f64;

    /// First display position with any part visible.
    fn first_visible_position(&self) -> Option<usize>;

    /// Last display position with any part visible.
    fn last_visible_position(&self) -> Option<usize>;

    /// First display position that is entirely visible.
    fn first_fully_visible_position(&self) -> Option<usize>;

    /// Last display position that is entirely visible.
    fn last_fully_visible_position(&self) -> Option<usize>;

    /// Rendered item whose untranslated bounds contain `point`.
    fn item_at_point(&self, point: Point) -> Option<RenderedItem>;

    /// Rendered item at a display position.
    fn item_at_position(&self, position: usize) -> Option<RenderedItem>;

    /// Rendered item shown by `handle`.
    fn item_for_handle(&self, handle: HandleId) -> Option<RenderedItem>;

    /// Topmost rendered item.
    fn first_rendered_item(&self) -> Option<RenderedItem>;

    /// Sets the vertical translation of a rendered item.
    fn set_item_translation(&mut self, handle: HandleId, dy: f64);

    /// Hides or shows a rendered item.
    fn set_item_hidden(&mut self, handle: HandleId, hidden: bool);

    /// Captures an image of `item`, grown by `overlay_padding`.
    fn capture_snapshot(&mut self, item: &RenderedItem, overlay_padding: Insets) -> Self::Snapshot;

    /// Ends running layout animations, for one item or for all of them.
    fn end_item_animations(&mut self, handle: Option<HandleId>) {
        let _ = handle;
    }

    /// Whether overscroll effects are enabled.
    fn overscroll_enabled(&self) -> bool {
        true
    }

    /// Enables or disables overscroll effects.
    fn set_overscroll_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Asks enclosing containers not to claim the current gesture.
    fn request_exclusive_gesture(&mut self, exclusive: bool) {
        let _ = exclusive;
    }

    /// Schedules a redraw.
    fn request_redraw(&mut self) {}

    /// The display order changed.
    fn on_display_change(&mut self, change: &DisplayChange, display: &dyn DisplaySequence);
}
