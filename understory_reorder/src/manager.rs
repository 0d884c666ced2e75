// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag controller.
//!
//! [`ReorderManager`] consumes pointer events and frame ticks, decides when a
//! drag starts, moves the floating item, performs swaps with hysteresis,
//! autoscrolls near the edges, and commits or cancels the drag.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --down on a valid item--> Pending
//! Pending --slop exceeded or long press, capability and range ok--> Dragging
//! Pending --up/cancel, or the item under the pointer changed--> Idle
//! Dragging --up--> commit, Idle
//! Dragging --cancel, source change, gesture relinquished--> revert, Idle
//! ```
//!
//! [`ReorderManager::cancel_drag`] is deferred: the drag reports as not
//! dragging immediately and is torn down on the next frame or pointer event.
//!
//! All calls take the viewport explicitly, so the manager never holds on to
//! host state between events.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Insets, Point, Rect};
use smallvec::SmallVec;

use crate::util::{round_half_up, signum};
use crate::{
    DisplaySequence, DragStateFlags, DragStateTracker, DraggableRange, EdgeGlow, FloatingItem,
    HandleId, ItemId, RenderedItem, ReorderAdapter, ReorderConfig, ReorderError, ReorderSource,
    SettleAnimation, SourceChange, SwapTargetOperator, Viewport, find_swap_target, should_swap,
};

/// Receives drag lifecycle notifications.
pub trait ReorderListener {
    /// A drag started at source `position`.
    fn on_drag_started(&mut self, position: usize) {
        let _ = position;
    }

    /// A drag ended. `from` is the source position the item was picked up
    /// from, `to` the display position it was released at, and `committed`
    /// whether the drop was accepted.
    fn on_drag_finished(&mut self, from: usize, to: usize, committed: bool) {
        let _ = (from, to, committed);
    }
}

/// Where the manager is in the drag lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// No pointer is being tracked.
    Idle,
    /// A press landed on a valid item; no drag has started yet.
    Pending,
    /// A drag is in progress.
    Dragging,
    /// A cancel was requested and will be applied on the next frame.
    Finishing,
}

bitflags::bitflags! {
    /// Directions autoscroll is currently allowed to scroll in.
    ///
    /// A direction unlocks once the pointer has travelled more than the
    /// scroll slop that way during the drag, so that a drag started near an
    /// edge does not immediately scroll.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollDirections: u8 {
        /// Scrolling toward the start of the list.
        const UP = 1 << 0;
        /// Scrolling toward the end of the list.
        const DOWN = 1 << 1;
    }
}

/// What a newly bound rendered item should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemBinding {
    /// Source position of the item displayed at the bound slot.
    pub source_position: usize,
    /// Drag state flags for the item.
    pub flags: DragStateFlags,
}

#[derive(Copy, Clone, Debug)]
struct PendingPress {
    item_id: ItemId,
    initial_y: f64,
    last_point: Point,
    long_press_deadline: Option<u64>,
}

#[derive(Copy, Clone, Debug)]
struct TouchTrack {
    start_y: f64,
    last_y: f64,
    min_y: f64,
    max_y: f64,
    directions: ScrollDirections,
}

impl TouchTrack {
    fn new(y: f64) -> Self {
        Self {
            start_y: y,
            last_y: y,
            min_y: y,
            max_y: y,
            directions: ScrollDirections::empty(),
        }
    }

    fn record(&mut self, y: f64, scroll_slop: f64) {
        self.last_y = y;
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        if self.start_y - self.min_y > scroll_slop || self.max_y - self.last_y > scroll_slop {
            self.directions |= ScrollDirections::UP;
        }
        if self.max_y - self.start_y > scroll_slop || self.last_y - self.min_y > scroll_slop {
            self.directions |= ScrollDirections::DOWN;
        }
    }
}

#[derive(Debug)]
struct DragSession<Snap> {
    item_id: ItemId,
    handle: Option<HandleId>,
    range: DraggableRange,
    touch: TouchTrack,
    grabbed_offset_y: f64,
    item_height: f64,
    item_margins: Insets,
    restore_overscroll: bool,
    floating: FloatingItem<Snap>,
    swap_target: SwapTargetOperator,
}

/// Drives drag-to-reorder for one list.
///
/// The manager owns the [`ReorderAdapter`] wrapping the source. Hosts
/// render in the adapter's display order, feed pointer events and frame
/// ticks in, and apply the viewport calls the manager makes.
pub struct ReorderManager<S: ReorderSource, V: Viewport> {
    adapter: ReorderAdapter<S>,
    config: ReorderConfig,
    pending: Option<PendingPress>,
    session: Option<DragSession<V::Snapshot>>,
    deferred_cancel: bool,
    edge_glow: EdgeGlow,
    settling: SmallVec<[SettleAnimation; 2]>,
    listener: Option<Box<dyn ReorderListener>>,
}

impl<S: ReorderSource + fmt::Debug, V: Viewport> fmt::Debug for ReorderManager<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderManager")
            .field("adapter", &self.adapter)
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("edge_glow", &self.edge_glow)
            .field("settling", &self.settling.len())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ReorderSource, V: Viewport> ReorderManager<S, V> {
    /// Creates a manager with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReorderConfig::default())
    }

    /// Creates a manager with `config`.
    pub fn with_config(source: S, config: ReorderConfig) -> Self {
        Self {
            adapter: ReorderAdapter::new(source),
            config,
            pending: None,
            session: None,
            deferred_cancel: false,
            edge_glow: EdgeGlow::default(),
            settling: SmallVec::new(),
            listener: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect for the next drag.
    pub fn set_config(&mut self, config: ReorderConfig) {
        self.config = config;
    }

    /// Installs the lifecycle listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn ReorderListener>) {
        self.listener = Some(listener);
    }

    /// Removes and returns the lifecycle listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn ReorderListener>> {
        self.listener.take()
    }

    /// The adapter presenting the display order.
    pub fn adapter(&self) -> &ReorderAdapter<S> {
        &self.adapter
    }

    /// The backing source.
    pub fn source(&self) -> &S {
        self.adapter.source()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DragPhase {
        match (&self.session, self.deferred_cancel, &self.pending) {
            (Some(_), true, _) => DragPhase::Finishing,
            (Some(_), false, _) => DragPhase::Dragging,
            (None, _, Some(_)) => DragPhase::Pending,
            (None, _, None) => DragPhase::Idle,
        }
    }

    /// Whether a drag is in progress and not about to be cancelled.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some() && !self.deferred_cancel
    }

    /// The floating item of the active drag.
    pub fn floating(&self) -> Option<&FloatingItem<V::Snapshot>> {
        self.session.as_ref().map(|s| &s.floating)
    }

    /// The swap-target operator of the active drag.
    pub fn swap_target(&self) -> Option<&SwapTargetOperator> {
        self.session.as_ref().map(|s| &s.swap_target)
    }

    /// Directions autoscroll may currently scroll in.
    pub fn scroll_directions(&self) -> ScrollDirections {
        self.session
            .as_ref()
            .map_or(ScrollDirections::empty(), |s| s.touch.directions)
    }

    /// Edge glow state.
    pub fn edge_glow(&self) -> &EdgeGlow {
        &self.edge_glow
    }

    /// Whether settle-back animations are still running.
    pub fn is_settling(&self) -> bool {
        !self.settling.is_empty()
    }

    /// Pointer pressed at `point`. Returns whether a drag may follow.
    pub fn on_pointer_down(&mut self, viewport: &mut V, point: Point, time_ms: u64) -> bool {
        self.apply_deferred_cancel(viewport);
        if self.session.is_some() {
            return false;
        }
        self.pending = None;
        let Some(item) = viewport.item_at_point(point) else {
            return false;
        };
        if !self.is_touched_item_valid(&item) {
            return false;
        }
        let Some(item_id) = item.item_id else {
            return false;
        };
        let long_press_deadline = self
            .config
            .start_mode
            .starts_on_long_press()
            .then(|| time_ms.saturating_add(self.config.long_press_timeout_ms));
        self.pending = Some(PendingPress {
            item_id,
            initial_y: point.y,
            last_point: point,
            long_press_deadline,
        });
        true
    }

    /// Pointer moved to `point`. Returns whether the event belongs to a drag.
    ///
    /// A pending long press whose timeout has passed by `time_ms` starts the
    /// drag here, even if no frame ran since the deadline.
    pub fn on_pointer_move(
        &mut self,
        viewport: &mut V,
        point: Point,
        time_ms: u64,
    ) -> Result<bool, ReorderError> {
        self.apply_deferred_cancel(viewport);
        if self.session.is_some() {
            self.handle_move_while_dragging(viewport, point)?;
            return Ok(true);
        }
        let long_press_due = self
            .pending
            .and_then(|p| p.long_press_deadline)
            .is_some_and(|deadline| deadline <= time_ms);
        if long_press_due {
            if let Some(pending) = self.pending.as_mut() {
                pending.long_press_deadline = None;
            }
            return self.check_condition_and_start(viewport, point, false);
        }
        if self.config.start_mode.starts_on_move() {
            return self.check_condition_and_start(viewport, point, true);
        }
        if let Some(pending) = self.pending.as_mut() {
            pending.last_point = point;
            if (point.y - pending.initial_y).abs() > self.config.touch_slop {
                self.pending = None;
            }
        }
        Ok(false)
    }

    /// Pointer released. Commits an active drag. Returns whether a drag ended.
    pub fn on_pointer_up(&mut self, viewport: &mut V) -> bool {
        self.handle_up_or_cancel(viewport, true)
    }

    /// Pointer gesture cancelled. Reverts an active drag. Returns whether a
    /// drag ended.
    pub fn on_pointer_cancel(&mut self, viewport: &mut V) -> bool {
        self.handle_up_or_cancel(viewport, false)
    }

    /// An enclosing container claimed the gesture. Ends any drag at once,
    /// without committing.
    pub fn on_gesture_relinquished(&mut self, viewport: &mut V) {
        self.pending = None;
        self.finish_dragging(viewport, false);
    }

    /// Requests a non-committing end of the active drag.
    ///
    /// The drag stops reporting as dragging right away and is torn down on
    /// the next [`on_frame`](Self::on_frame) or pointer event. Repeated calls
    /// before then have no further effect.
    pub fn cancel_drag(&mut self) {
        if self.session.is_some() && !self.deferred_cancel {
            self.deferred_cancel = true;
            #[cfg(feature = "tracing")]
            tracing::trace!("drag cancel requested");
        }
    }

    /// Advances animations, autoscroll, swap checks and pending long presses.
    ///
    /// Hosts call this once per frame while it keeps returning `true`.
    pub fn on_frame(&mut self, viewport: &mut V, now_ms: u64) -> Result<bool, ReorderError> {
        self.apply_deferred_cancel(viewport);

        if self.session.is_none() {
            let due = self
                .pending
                .and_then(|p| p.long_press_deadline.map(|d| (d, p.last_point)))
                .filter(|(deadline, _)| *deadline <= now_ms);
            if let Some((_, point)) = due {
                if let Some(pending) = self.pending.as_mut() {
                    pending.long_press_deadline = None;
                }
                self.check_condition_and_start(viewport, point, false)?;
            }
        }

        if self.session.is_some() {
            self.handle_scroll_on_dragging(viewport);
            self.check_item_swapping(viewport)?;
            let len = self.adapter.len();
            if let Some(session) = self.session.as_mut() {
                session.swap_target.on_frame(viewport, session.handle, len);
            }
        }

        self.settling.retain(|anim| anim.step(viewport, now_ms));
        self.flush_changes(viewport);

        let long_press_pending = self
            .pending
            .is_some_and(|p| p.long_press_deadline.is_some());
        Ok(self.session.is_some() || long_press_pending || !self.settling.is_empty())
    }

    /// Reports a structural change to the source.
    ///
    /// While idle the change is forwarded to the viewport. During a drag it
    /// is held back and the drag is cancelled, because the captured
    /// positions no longer describe the source.
    pub fn on_source_changed(&mut self, viewport: &mut V, change: SourceChange) {
        if self.adapter.on_source_changed(change) {
            #[cfg(feature = "tracing")]
            tracing::debug!(?change, "source changed during drag");
            self.cancel_drag();
        }
        self.flush_changes(viewport);
    }

    /// Mutates the source and reports the resulting change.
    pub fn update_source<R>(
        &mut self,
        viewport: &mut V,
        update: impl FnOnce(&mut S) -> (R, SourceChange),
    ) -> R {
        let (out, change) = update(self.adapter.source_mut());
        self.on_source_changed(viewport, change);
        out
    }

    /// The viewport recycled `handle`.
    pub fn on_item_recycled(&mut self, viewport: &mut V, handle: HandleId) {
        self.settling.retain(|anim| anim.handle() != handle);
        if let Some(session) = self.session.as_mut() {
            if session.handle == Some(handle) {
                session.handle = None;
                session.floating.invalidate_handle(viewport);
                #[cfg(feature = "tracing")]
                tracing::trace!(?handle, "dragged item handle recycled");
            }
        }
    }

    /// The viewport bound `handle` to display `position`.
    ///
    /// When the handle shows the dragged item, the new handle is adopted and
    /// hidden. `tracker` is the host's per-handle record used to derive
    /// [`DragStateFlags::UPDATED`].
    ///
    /// # Errors
    ///
    /// [`ReorderError::HandleAlreadyAssigned`] if the dragged item is bound
    /// to a second handle before the previous one was reported through
    /// [`on_item_recycled`](Self::on_item_recycled). The drag keeps its
    /// current handle.
    pub fn on_item_bound(
        &mut self,
        viewport: &mut V,
        handle: HandleId,
        position: usize,
        tracker: &mut DragStateTracker,
    ) -> Result<ItemBinding, ReorderError> {
        if let Some(session) = self.session.as_mut() {
            let bound_id = self.adapter.item_id(position);
            if bound_id == Some(session.item_id) && session.handle != Some(handle) {
                if let Err(err) = session.floating.attach_handle(viewport, handle) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(%err, "dragged item bound to a second handle");
                    return Err(err);
                }
                session.handle = Some(handle);
                #[cfg(feature = "tracing")]
                tracing::trace!(?handle, position, "dragged item rebound");
            }
        }
        Ok(ItemBinding {
            source_position: self.adapter.original_position(position),
            flags: self.adapter.query_state(position, tracker),
        })
    }

    /// Drops the manager, returning the source.
    pub fn into_source(self) -> S {
        self.adapter.into_source()
    }

    fn apply_deferred_cancel(&mut self, viewport: &mut V) {
        if self.deferred_cancel {
            self.finish_dragging(viewport, false);
        }
    }

    fn is_touched_item_valid(&self, item: &RenderedItem) -> bool {
        item.position < self.adapter.len()
            && item.item_id.is_some()
            && item.item_id == self.adapter.item_id(item.position)
    }

    fn check_condition_and_start(
        &mut self,
        viewport: &mut V,
        point: Point,
        check_slop: bool,
    ) -> Result<bool, ReorderError> {
        if self.session.is_some() {
            return Ok(false);
        }
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        pending.last_point = point;
        if check_slop && (point.y - pending.initial_y).abs() <= self.config.touch_slop {
            return Ok(false);
        }
        let pending_id = pending.item_id;

        let item = viewport
            .item_at_point(point)
            .filter(|item| self.is_touched_item_valid(item) && item.item_id == Some(pending_id));
        let Some(item) = item else {
            self.pending = None;
            return Ok(false);
        };

        let position = item.position;
        let local = Point::new(
            point.x - item.bounds.x0,
            point.y - (item.bounds.y0 + item.translation_y),
        );
        if !self.adapter.can_start_drag(&item, position, local) {
            return Ok(false);
        }

        let len = self.adapter.len();
        let range = self
            .adapter
            .item_draggable_range(&item, position)
            .unwrap_or(DraggableRange::full(len));
        if let Err(err) = range.validate(len, position) {
            self.pending = None;
            return Err(err);
        }

        self.start_dragging(viewport, point, &item, range)?;
        Ok(true)
    }

    fn start_dragging(
        &mut self,
        viewport: &mut V,
        point: Point,
        item: &RenderedItem,
        range: DraggableRange,
    ) -> Result<(), ReorderError> {
        viewport.end_item_animations(Some(item.handle));
        self.settling.retain(|anim| anim.handle() != item.handle);
        self.pending = None;
        self.adapter.enter_drag(item, range)?;
        let Some(item_id) = self.adapter.dragging_item_id() else {
            return Ok(());
        };

        let restore_overscroll = viewport.overscroll_enabled();
        viewport.set_overscroll_enabled(false);
        viewport.request_exclusive_gesture(true);
        self.flush_changes(viewport);

        let grabbed_offset_y = point.y - item.top();
        let floating = FloatingItem::start(
            viewport,
            item,
            range,
            grabbed_offset_y,
            self.config.overlay_padding,
            point.y,
        );
        let mut swap_target = SwapTargetOperator::new(
            item,
            item_id,
            range,
            self.config.swap_easing,
            self.config.swap_smoothing,
        );
        swap_target.update(floating.translation_y());

        self.session = Some(DragSession {
            item_id,
            handle: Some(item.handle),
            range,
            touch: TouchTrack::new(point.y),
            grabbed_offset_y,
            item_height: item.height(),
            item_margins: item.margins,
            restore_overscroll,
            floating,
            swap_target,
        });

        let initial = self.adapter.initial_position().unwrap_or(item.position);
        #[cfg(feature = "tracing")]
        tracing::debug!(position = initial, %range, "drag started");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drag_started(initial);
        }
        Ok(())
    }

    fn handle_up_or_cancel(&mut self, viewport: &mut V, commit: bool) -> bool {
        self.pending = None;
        if self.session.is_none() {
            return false;
        }
        // A cancel requested earlier wins over a release.
        let commit = commit && !self.deferred_cancel;
        self.finish_dragging(viewport, commit);
        true
    }

    fn handle_move_while_dragging(
        &mut self,
        viewport: &mut V,
        point: Point,
    ) -> Result<(), ReorderError> {
        let scroll_slop = self.config.scroll_touch_slop();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.touch.record(point.y, scroll_slop);
        session.floating.update(viewport, point.y);
        session.swap_target.update(session.floating.translation_y());
        self.check_item_swapping(viewport)
    }

    fn check_item_swapping(&mut self, viewport: &mut V) -> Result<(), ReorderError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let Some(dragging) = session.handle.and_then(|h| viewport.item_for_handle(h)) else {
            return Ok(());
        };
        let floating_top = session.touch.last_y - session.grabbed_offset_y;
        let target = find_swap_target(
            &*viewport,
            self.adapter.len(),
            &dragging,
            session.item_id,
            floating_top,
            &session.range,
        );
        match target {
            Some(target) if target.handle != dragging.handle => {
                self.swap_items(viewport, &dragging, &target, floating_top)
            }
            _ => Ok(()),
        }
    }

    fn swap_items(
        &mut self,
        viewport: &mut V,
        dragging: &RenderedItem,
        target: &RenderedItem,
        floating_top: f64,
    ) -> Result<(), ReorderError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let from = dragging.position;
        let to = target.position;
        if self.adapter.item_id(from) != Some(session.item_id) {
            // The display has not caught up with the last swap yet.
            return Ok(());
        }

        let m1 = session.item_margins;
        let dragging_footprint = Rect::new(
            dragging.bounds.x0,
            dragging.top() - m1.y0,
            dragging.bounds.x1,
            dragging.bottom() + m1.y1,
        );
        let floating_mid = floating_top + session.item_height * 0.5;
        if !should_swap(from, to, dragging_footprint, target.footprint(), floating_mid) {
            return Ok(());
        }
        let dragged_extent = session.item_height + m1.y0 + m1.y1;

        let prev_top = viewport.first_rendered_item().map(|item| item.position);
        if let Err(err) = self.adapter.move_to(from, to) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "display out of sync with drag; ending drag");
            self.finish_dragging(viewport, false);
            return Err(err);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from, to, "swapped");
        self.flush_changes(viewport);
        viewport.end_item_animations(None);

        // Keep the viewport anchored when the first rendered row moved.
        if prev_top == Some(from) {
            let m2 = target.margins;
            viewport.scroll_by(-(target.height() + m2.y0 + m2.y1));
        } else if prev_top == Some(to) {
            viewport.scroll_by(-dragged_extent);
        }
        viewport.end_item_animations(None);
        Ok(())
    }

    fn handle_scroll_on_dragging(&mut self, viewport: &mut V) {
        let height = viewport.height();
        if height <= 0.0 {
            return;
        }
        let density = self.config.display_density;
        let autoscroll = self.config.autoscroll;
        let glow_strength = self.config.edge_glow_strength;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let inv_height = 1.0 / height;
        let center_offset = session.touch.last_y * inv_height - 0.5;
        let acceleration = if autoscroll.edge_fraction > 0.0 {
            (autoscroll.edge_fraction - (0.5 - center_offset.abs())).max(0.0)
                / autoscroll.edge_fraction
        } else {
            0.0
        };
        let mut amount =
            signum(center_offset) * round_half_up(autoscroll.speed * density * acceleration);

        let range = session.range;
        let first = viewport.first_fully_visible_position();
        let last = viewport.last_fully_visible_position();
        let top_soft = first.is_some_and(|p| p <= range.start());
        let top_hard = first.is_some_and(|p| p < range.start());
        let bottom_soft = last.is_some_and(|p| p >= range.end());
        let bottom_hard = last.is_some_and(|p| p > range.end());

        let directions = session.touch.directions;
        if (amount < 0.0 && !directions.contains(ScrollDirections::UP))
            || (amount > 0.0 && !directions.contains(ScrollDirections::DOWN))
        {
            amount = 0.0;
        }

        let mut actual = 0.0;
        if (!top_hard && amount < 0.0) || (!bottom_hard && amount > 0.0) {
            viewport.end_item_animations(None);
            actual = viewport.scroll_by(amount);
            #[cfg(feature = "tracing")]
            if actual != 0.0 {
                tracing::trace!(amount, actual, "autoscrolled");
            }
            let scrolling = if amount < 0.0 { !top_soft } else { !bottom_soft };
            session.floating.set_scrolling(scrolling);
            session.floating.refresh(viewport);
            session.swap_target.update(session.floating.translation_y());
        } else {
            session.floating.set_scrolling(false);
        }

        let floating = &session.floating;
        let top = floating.translation_y();
        let bottom = floating.translated_bottom();
        let single_row = first == Some(0) && last == Some(0);
        let near_edge = if single_row {
            if amount < 0.0 { top } else { bottom }
        } else if (top + bottom) * 0.5 < height * 0.5 {
            top
        } else {
            bottom
        };
        let near_offset = near_edge * inv_height - 0.5;

        let mut pull = 0.0;
        if near_offset.abs() > 0.4 && amount != 0.0 && actual == 0.0 {
            if near_offset < 0.0 {
                if floating.reached_top_limit() {
                    pull = -density * glow_strength;
                }
            } else if floating.reached_bottom_limit() {
                pull = density * glow_strength;
            }
        }
        if pull < 0.0 {
            self.edge_glow.pull_top(pull);
            viewport.request_redraw();
        } else if pull > 0.0 {
            self.edge_glow.pull_bottom(pull);
            viewport.request_redraw();
        } else if self.edge_glow.release_both() {
            viewport.request_redraw();
        }
    }

    fn finish_dragging(&mut self, viewport: &mut V, commit: bool) {
        self.deferred_cancel = false;
        let Some(session) = self.session.take() else {
            return;
        };
        // Without a rendered item the drop slot is unknown.
        let commit = commit && session.handle.is_some();

        viewport.set_overscroll_enabled(session.restore_overscroll);
        let settle = self.config.settle_params();
        if let Some(anim) = session.floating.finish(viewport, &settle) {
            self.settling.push(anim);
        }
        if let Some(anim) = session.swap_target.finish(viewport, &settle) {
            self.settling.push(anim);
        }
        self.edge_glow.release_both();
        viewport.request_exclusive_gesture(false);
        viewport.request_redraw();

        let finished = self.adapter.finish_drag(commit);
        self.flush_changes(viewport);

        if let Some(done) = finished {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = done.initial,
                to = done.current,
                commit,
                moved = done.moved,
                "drag finished"
            );
            if let Some(listener) = self.listener.as_mut() {
                listener.on_drag_finished(done.initial, done.current, commit);
            }
        }
    }

    fn flush_changes(&mut self, viewport: &mut V) {
        for change in self.adapter.take_changes() {
            viewport.on_display_change(&change, &self.adapter);
        }
    }
}
