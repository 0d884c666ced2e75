// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating copy of the dragged item.

use kurbo::{Insets, Rect, Size};

use crate::{
    DraggableRange, HandleId, RenderedItem, ReorderError, SettleAnimation, SettleParams, Viewport,
};

/// Snapshot of the dragged item that follows the pointer.
///
/// The real item stays hidden in its display slot while the floating copy
/// is drawn at [`draw_rect`](Self::draw_rect). Its vertical position is the
/// pointer position minus the grab offset, clamped between the first and
/// last in-range rendered slots (or the padded viewport while autoscroll is
/// running).
#[derive(Debug)]
pub struct FloatingItem<Snap> {
    snapshot: Snap,
    handle: Option<HandleId>,
    range: DraggableRange,
    grabbed_offset_y: f64,
    item_size: Size,
    margins: Insets,
    overlay_padding: Insets,
    padding_left: f64,
    touch_y: f64,
    translation_y: f64,
    top_limit: f64,
    bottom_limit: f64,
    scrolling: bool,
}

impl<Snap> FloatingItem<Snap> {
    pub(crate) fn start<V: Viewport<Snapshot = Snap> + ?Sized>(
        viewport: &mut V,
        item: &RenderedItem,
        range: DraggableRange,
        grabbed_offset_y: f64,
        overlay_padding: Insets,
        touch_y: f64,
    ) -> Self {
        let snapshot = viewport.capture_snapshot(item, overlay_padding);
        viewport.set_item_hidden(item.handle, true);
        let mut floating = Self {
            snapshot,
            handle: Some(item.handle),
            range,
            grabbed_offset_y,
            item_size: item.bounds.size(),
            margins: item.margins,
            overlay_padding,
            padding_left: viewport.padding().x0,
            touch_y,
            translation_y: item.top(),
            top_limit: 0.0,
            bottom_limit: 0.0,
            scrolling: false,
        };
        floating.refresh(viewport);
        floating
    }

    /// The captured image.
    pub fn snapshot(&self) -> &Snap {
        &self.snapshot
    }

    /// Handle of the hidden real item, if it is currently rendered.
    pub fn handle(&self) -> Option<HandleId> {
        self.handle
    }

    /// Top of the floating item in viewport coordinates.
    pub fn translation_y(&self) -> f64 {
        self.translation_y
    }

    /// Where the host should draw the snapshot.
    pub fn draw_rect(&self) -> Rect {
        let pad = self.overlay_padding;
        let x0 = self.padding_left + self.margins.x0 - pad.x0;
        let y0 = self.translation_y - pad.y0;
        Rect::new(
            x0,
            y0,
            x0 + self.item_size.width + pad.x0 + pad.x1,
            y0 + self.item_size.height + pad.y0 + pad.y1,
        )
    }

    /// Current lower bound of [`translation_y`](Self::translation_y).
    pub fn top_limit(&self) -> f64 {
        self.top_limit
    }

    /// Current upper bound of [`translation_y`](Self::translation_y).
    pub fn bottom_limit(&self) -> f64 {
        self.bottom_limit
    }

    /// Whether the floating item is pinned at its top limit.
    pub fn reached_top_limit(&self) -> bool {
        self.translation_y == self.top_limit
    }

    /// Whether the floating item is pinned at its bottom limit.
    pub fn reached_bottom_limit(&self) -> bool {
        self.translation_y == self.bottom_limit
    }

    /// Bottom edge of the floating item.
    pub fn translated_bottom(&self) -> f64 {
        self.translation_y + self.item_size.height
    }

    /// Whether autoscroll widened the limits to the padded viewport.
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub(crate) fn set_scrolling(&mut self, scrolling: bool) {
        self.scrolling = scrolling;
    }

    pub(crate) fn update<V: Viewport + ?Sized>(&mut self, viewport: &mut V, touch_y: f64) {
        self.touch_y = touch_y;
        self.refresh(viewport);
    }

    pub(crate) fn refresh<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        self.update_limits(&*viewport);
        self.translation_y = (self.touch_y - self.grabbed_offset_y)
            .max(self.top_limit)
            .min(self.bottom_limit);
        self.sync_hidden_item(viewport);
        viewport.request_redraw();
    }

    fn update_limits<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        let padding = viewport.padding();
        if viewport.first_rendered_item().is_none() {
            self.top_limit = padding.y0;
            self.bottom_limit = padding.y0;
            return;
        }
        let mut top = padding.y0;
        let mut bottom = (viewport.height() - padding.y1 - self.item_size.height).max(0.0);
        if !self.scrolling {
            if let (Some(first), Some(last)) = (
                viewport.first_visible_position(),
                viewport.last_visible_position(),
            ) {
                let in_range = |p: &usize| self.range.contains(*p);
                if let Some(item) = (first..=last)
                    .filter(in_range)
                    .find_map(|p| viewport.item_at_position(p))
                {
                    top = bottom.min(item.top());
                }
                if let Some(item) = (first..=last)
                    .rev()
                    .filter(in_range)
                    .find_map(|p| viewport.item_at_position(p))
                {
                    bottom = bottom.min(item.top());
                }
            }
        }
        self.top_limit = top;
        self.bottom_limit = bottom;
    }

    /// Keeps the hidden real item under the floating copy so that layout
    /// animations and hit testing stay consistent with what is drawn.
    fn sync_hidden_item<V: Viewport + ?Sized>(&self, viewport: &mut V) {
        if let Some(item) = self.handle.and_then(|h| viewport.item_for_handle(h)) {
            viewport.set_item_translation(item.handle, self.translation_y - item.top());
        }
    }

    /// Drops the current handle after the viewport recycled it.
    pub(crate) fn invalidate_handle<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        if let Some(handle) = self.handle.take() {
            viewport.set_item_hidden(handle, false);
            viewport.set_item_translation(handle, 0.0);
        }
    }

    /// Adopts a new handle for the dragged item.
    pub(crate) fn attach_handle<V: Viewport + ?Sized>(
        &mut self,
        viewport: &mut V,
        handle: HandleId,
    ) -> Result<(), ReorderError> {
        if let Some(current) = self.handle {
            return Err(ReorderError::HandleAlreadyAssigned {
                current,
                new: handle,
            });
        }
        self.handle = Some(handle);
        viewport.set_item_hidden(handle, true);
        self.sync_hidden_item(viewport);
        Ok(())
    }

    /// Unhides the real item and starts easing it from the floating
    /// position back into its slot.
    pub(crate) fn finish<V: Viewport + ?Sized>(
        self,
        viewport: &mut V,
        params: &SettleParams,
    ) -> Option<SettleAnimation> {
        viewport.end_item_animations(None);
        let handle = self.handle?;
        viewport.set_item_hidden(handle, false);
        let item = viewport.item_for_handle(handle)?;
        let from = self.translation_y - item.top();
        SettleAnimation::begin(viewport, handle, from, item.height(), params)
    }
}
