// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-order view over a [`ReorderSource`] during a drag.
//!
//! While a drag is in progress the source is left untouched. The adapter
//! tracks where the dragged item currently sits in the display (`current`)
//! and where it came from (`initial`), and maps display positions to source
//! positions through that single displacement. The source is only mutated
//! once, when the drag commits.

use alloc::vec::Vec;

use kurbo::Point;

use crate::{
    DisplayChange, DisplaySequence, DragStateFlags, DragStateTracker, DraggableRange, ItemId,
    RenderedItem, ReorderError, ReorderSource, SourceChange,
};

/// Maps a display position to a source position, given a drag that moved
/// one item from `initial` to `current`.
///
/// Positions outside the span between the two are unaffected. The dragged
/// item's slot `current` maps back to `initial`; the rest of the span shifts
/// by one toward the vacated slot.
#[must_use]
pub fn display_to_source(position: usize, initial: usize, current: usize) -> usize {
    if initial == current
        || (position < initial && position < current)
        || (position > initial && position > current)
    {
        return position;
    }
    if position == current {
        initial
    } else if current < initial {
        position - 1
    } else {
        position + 1
    }
}

/// Inverse of [`display_to_source`].
#[must_use]
pub fn source_to_display(position: usize, initial: usize, current: usize) -> usize {
    if initial == current
        || (position < initial && position < current)
        || (position > initial && position > current)
    {
        return position;
    }
    if position == initial {
        current
    } else if current < initial {
        position + 1
    } else {
        position - 1
    }
}

/// Outcome of a finished drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FinishedDrag {
    /// Source position the item was picked up from.
    pub initial: usize,
    /// Display position the item was dropped at.
    pub current: usize,
    /// Whether the source was asked to move the item.
    pub moved: bool,
}

#[derive(Copy, Clone, Debug)]
struct AdapterSession {
    item_id: ItemId,
    initial: usize,
    current: usize,
    range: DraggableRange,
}

/// Wraps a [`ReorderSource`] and presents the in-drag display order.
#[derive(Debug)]
pub struct ReorderAdapter<S> {
    source: S,
    session: Option<AdapterSession>,
    changes: Vec<DisplayChange>,
}

impl<S: ReorderSource> ReorderAdapter<S> {
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            session: None,
            changes: Vec::new(),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the wrapped source.
    ///
    /// Structural changes made through this reference must be reported with
    /// [`on_source_changed`](Self::on_source_changed).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwraps the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Whether a drag is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Identity of the dragged item.
    pub fn dragging_item_id(&self) -> Option<ItemId> {
        self.session.map(|s| s.item_id)
    }

    /// Source position the dragged item was picked up from.
    pub fn initial_position(&self) -> Option<usize> {
        self.session.map(|s| s.initial)
    }

    /// Display position the dragged item currently occupies.
    pub fn current_position(&self) -> Option<usize> {
        self.session.map(|s| s.current)
    }

    /// Range of the active drag.
    pub fn draggable_range(&self) -> Option<DraggableRange> {
        self.session.map(|s| s.range)
    }

    /// Source position of the item displayed at `position`.
    pub fn original_position(&self, position: usize) -> usize {
        match self.session {
            Some(s) => display_to_source(position, s.initial, s.current),
            None => position,
        }
    }

    /// Display position of the item at source `position`.
    pub fn display_position(&self, position: usize) -> usize {
        match self.session {
            Some(s) => source_to_display(position, s.initial, s.current),
            None => position,
        }
    }

    /// Asks the source whether a drag may start on `item`.
    pub fn can_start_drag(&self, item: &RenderedItem, position: usize, local: Point) -> bool {
        let position = self.original_position(position);
        self.source
            .draggable()
            .is_some_and(|d| d.can_start_drag(item, position, local))
    }

    /// Asks the source for the range `item` may move in.
    pub fn item_draggable_range(
        &self,
        item: &RenderedItem,
        position: usize,
    ) -> Option<DraggableRange> {
        let position = self.original_position(position);
        self.source
            .draggable()
            .and_then(|d| d.draggable_range(item, position))
    }

    /// Starts tracking a drag of `item` within `range`.
    ///
    /// Fails with [`ReorderError::MissingItemId`] if the item has no identity.
    pub fn enter_drag(
        &mut self,
        item: &RenderedItem,
        range: DraggableRange,
    ) -> Result<(), ReorderError> {
        let item_id = item.item_id.ok_or(ReorderError::MissingItemId {
            position: item.position,
        })?;
        self.session = Some(AdapterSession {
            item_id,
            initial: item.position,
            current: item.position,
            range,
        });
        self.changes.push(DisplayChange::Reset);
        Ok(())
    }

    /// Moves the dragged item one step in the display from `from` to `to`.
    ///
    /// `from` must be the dragged item's display slot. Any other slot means
    /// the display and the adapter disagree, which is reported as
    /// [`ReorderError::TrackingMismatch`] without changing state.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let resolved = display_to_source(from, session.initial, session.current);
        if resolved != session.initial {
            return Err(ReorderError::TrackingMismatch {
                from,
                to,
                resolved,
                initial: session.initial,
                current: session.current,
            });
        }
        session.current = to;
        self.changes.push(DisplayChange::ItemMoved { from, to });
        Ok(())
    }

    /// Ends the drag. When `commit` is set and the item moved, the source
    /// receives exactly one [`ReorderSource::move_item`] call.
    pub fn finish_drag(&mut self, commit: bool) -> Option<FinishedDrag> {
        let session = self.session.take()?;
        let moved = commit && session.initial != session.current;
        if moved {
            self.source.move_item(session.initial, session.current);
        }
        self.changes.push(DisplayChange::Reset);
        Some(FinishedDrag {
            initial: session.initial,
            current: session.current,
            moved,
        })
    }

    /// Reports a change made to the source.
    ///
    /// Idle changes are passed through to the display. Returns `true` when a
    /// drag is in progress, in which case the change is held back and the
    /// drag has to be cancelled.
    pub fn on_source_changed(&mut self, change: SourceChange) -> bool {
        if self.session.is_some() {
            return true;
        }
        self.changes.push(DisplayChange::Passthrough(change));
        false
    }

    /// Drag state of the item displayed at `position`.
    pub fn drag_state(&self, position: usize) -> DragStateFlags {
        let Some(session) = self.session else {
            return DragStateFlags::empty();
        };
        let mut flags = DragStateFlags::DRAGGING;
        if self.item_id(position) == Some(session.item_id) {
            flags |= DragStateFlags::ACTIVE;
        }
        if session.range.contains(position) {
            flags |= DragStateFlags::IN_RANGE;
        }
        flags
    }

    /// [`drag_state`](Self::drag_state), with `UPDATED` derived from `tracker`.
    pub fn query_state(&self, position: usize, tracker: &mut DragStateTracker) -> DragStateFlags {
        tracker.update(self.drag_state(position))
    }

    /// Drains the display notifications queued since the last call.
    pub fn take_changes(&mut self) -> Vec<DisplayChange> {
        core::mem::take(&mut self.changes)
    }
}

impl<S: ReorderSource> DisplaySequence for ReorderAdapter<S> {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        self.source.item_id(self.original_position(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Insets, Rect};

    use crate::HandleId;

    #[derive(Debug)]
    struct Ids {
        ids: Vec<u64>,
        moves: Vec<(usize, usize)>,
    }

    impl Ids {
        fn new(n: u64) -> Self {
            Self {
                ids: (0..n).collect(),
                moves: Vec::new(),
            }
        }
    }

    impl ReorderSource for Ids {
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
    }

    fn item(position: usize, id: Option<u64>) -> RenderedItem {
        RenderedItem {
            handle: HandleId(position as u64),
            position,
            item_id: id.map(ItemId),
            bounds: Rect::new(0.0, 0.0, 100.0, 40.0),
            translation_y: 0.0,
            margins: Insets::ZERO,
            decoration: Insets::ZERO,
        }
    }

    fn display(adapter: &ReorderAdapter<Ids>) -> Vec<u64> {
        (0..DisplaySequence::len(adapter))
            .map(|p| DisplaySequence::item_id(adapter, p).unwrap().0)
            .collect()
    }

    #[test]
    fn mapping_is_identity_without_displacement() {
        for p in 0..6 {
            assert_eq!(display_to_source(p, 2, 2), p);
            assert_eq!(source_to_display(p, 2, 2), p);
        }
    }

    #[test]
    fn mapping_moving_down() {
        // Item 1 dragged to slot 3: display shows [0, 2, 3, 1, 4].
        let map: Vec<usize> = (0..5).map(|p| display_to_source(p, 1, 3)).collect();
        assert_eq!(map, vec![0, 2, 3, 1, 4]);
        let back: Vec<usize> = (0..5).map(|p| source_to_display(p, 1, 3)).collect();
        assert_eq!(back, vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn mapping_moving_up() {
        // Item 3 dragged to slot 0: display shows [3, 0, 1, 2, 4].
        let map: Vec<usize> = (0..5).map(|p| display_to_source(p, 3, 0)).collect();
        assert_eq!(map, vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn display_order_follows_moves_without_touching_source() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        a.enter_drag(&item(1, Some(1)), DraggableRange::full(5)).unwrap();
        a.move_to(1, 2).unwrap();
        a.move_to(2, 3).unwrap();
        assert_eq!(display(&a), vec![0, 2, 3, 1, 4]);
        assert!(a.source().moves.is_empty());
        assert_eq!(a.current_position(), Some(3));
        assert_eq!(a.original_position(3), 1);
        assert_eq!(a.display_position(1), 3);
    }

    #[test]
    fn commit_moves_source_once() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        a.enter_drag(&item(1, Some(1)), DraggableRange::full(5)).unwrap();
        a.move_to(1, 2).unwrap();
        a.move_to(2, 3).unwrap();
        let done = a.finish_drag(true).unwrap();
        assert_eq!(
            done,
            FinishedDrag {
                initial: 1,
                current: 3,
                moved: true
            }
        );
        assert_eq!(a.source().moves, vec![(1, 3)]);
        assert_eq!(display(&a), vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn cancel_leaves_source_untouched() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        a.enter_drag(&item(1, Some(1)), DraggableRange::full(5)).unwrap();
        a.move_to(1, 2).unwrap();
        let done = a.finish_drag(false).unwrap();
        assert!(!done.moved);
        assert!(a.source().moves.is_empty());
        assert_eq!(display(&a), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn net_zero_commit_issues_no_move() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        a.enter_drag(&item(2, Some(2)), DraggableRange::full(5)).unwrap();
        a.move_to(2, 3).unwrap();
        a.move_to(3, 2).unwrap();
        let done = a.finish_drag(true).unwrap();
        assert!(!done.moved);
        assert!(a.source().moves.is_empty());
    }

    #[test]
    fn move_from_wrong_slot_is_a_tracking_mismatch() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        a.enter_drag(&item(2, Some(2)), DraggableRange::full(5)).unwrap();
        let err = a.move_to(3, 4).unwrap_err();
        assert_eq!(
            err,
            ReorderError::TrackingMismatch {
                from: 3,
                to: 4,
                resolved: 3,
                initial: 2,
                current: 2
            }
        );
        assert_eq!(a.current_position(), Some(2));
    }

    #[test]
    fn items_without_identity_cannot_be_dragged() {
        let mut a = ReorderAdapter::new(Ids::new(3));
        assert_eq!(
            a.enter_drag(&item(1, None), DraggableRange::full(3)),
            Err(ReorderError::MissingItemId { position: 1 })
        );
        assert!(!a.is_dragging());
    }

    #[test]
    fn source_changes_pass_through_only_when_idle() {
        let mut a = ReorderAdapter::new(Ids::new(3));
        let change = SourceChange::Inserted { start: 0, count: 1 };
        assert!(!a.on_source_changed(change));
        assert_eq!(a.take_changes(), vec![DisplayChange::Passthrough(change)]);
        a.enter_drag(&item(0, Some(0)), DraggableRange::full(3)).unwrap();
        assert!(a.on_source_changed(change));
        assert_eq!(a.take_changes(), vec![DisplayChange::Reset]);
    }

    #[test]
    fn drag_state_marks_active_and_range() {
        let mut a = ReorderAdapter::new(Ids::new(5));
        assert_eq!(a.drag_state(0), DragStateFlags::empty());
        let range = DraggableRange::new(1, 3).unwrap();
        a.enter_drag(&item(2, Some(2)), range).unwrap();
        a.move_to(2, 3).unwrap();
        assert_eq!(
            a.drag_state(3),
            DragStateFlags::DRAGGING | DragStateFlags::ACTIVE | DragStateFlags::IN_RANGE
        );
        assert_eq!(
            a.drag_state(2),
            DragStateFlags::DRAGGING | DragStateFlags::IN_RANGE
        );
        assert_eq!(a.drag_state(4), DragStateFlags::DRAGGING);

        let mut tracker = DragStateTracker::new();
        assert!(a.query_state(3, &mut tracker).contains(DragStateFlags::UPDATED));
        assert!(!a.query_state(3, &mut tracker).contains(DragStateFlags::UPDATED));
    }
}
