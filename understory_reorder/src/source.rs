// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the backing collection and for what the display sees.

use kurbo::Point;

use crate::{DraggableRange, RenderedItem};

/// Stable identity of an item, unique within its collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

/// Identifies one rendered item in a viewport.
///
/// Handles are recycled by the viewport. The same handle may show different
/// items over time, and the same item may be shown by a new handle after it
/// scrolls out and back in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleId(pub u64);

/// The ordered collection being reordered.
///
/// The engine never mutates the source during a drag. The only mutation is a
/// single [`move_item`](Self::move_item) when a drag commits with a changed
/// position.
pub trait ReorderSource {
    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the item at `position`, or `None` if it has none.
    ///
    /// Items without identity can be displayed but never dragged.
    fn item_id(&self, position: usize) -> Option<ItemId>;

    /// Removes the item at `from` and reinserts it at `to`.
    fn move_item(&mut self, from: usize, to: usize);

    /// Drag capability for this source, if it supports reordering.
    fn draggable(&self) -> Option<&dyn DraggableItems> {
        None
    }
}

/// Per-item drag capability of a [`ReorderSource`].
pub trait DraggableItems {
    /// Whether a drag may start on `item` at `position`, touched at `local`
    /// (relative to the item's top-left corner, translation included).
    fn can_start_drag(&self, item: &RenderedItem, position: usize, local: Point) -> bool;

    /// Positions `item` may move between. `None` means the whole collection.
    fn draggable_range(&self, item: &RenderedItem, position: usize) -> Option<DraggableRange> {
        let _ = (item, position);
        None
    }
}

/// Structural change to the backing collection, in source positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceChange {
    /// Items changed in place.
    Changed {
        /// First changed position.
        start: usize,
        /// Number of changed items.
        count: usize,
    },
    /// Items were inserted.
    Inserted {
        /// Position of the first inserted item.
        start: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// Items were removed.
    Removed {
        /// Former position of the first removed item.
        start: usize,
        /// Number of removed items.
        count: usize,
    },
    /// Items were moved.
    Moved {
        /// Former position of the first moved item.
        from: usize,
        /// New position of the first moved item.
        to: usize,
        /// Number of moved items.
        count: usize,
    },
    /// Anything may have changed.
    Reset,
}

/// The order the display should show, which differs from the source order
/// while a drag is in progress.
pub trait DisplaySequence {
    /// Number of displayed items.
    fn len(&self) -> usize;

    /// Whether nothing is displayed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the item displayed at `position`.
    fn item_id(&self, position: usize) -> Option<ItemId>;
}

/// Change notification for the display, in display positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayChange {
    /// The dragged item moved one step in the display order.
    ItemMoved {
        /// Display position the item left.
        from: usize,
        /// Display position the item now occupies.
        to: usize,
    },
    /// A source change passed through while idle.
    Passthrough(SourceChange),
    /// The display must rebind everything (drag started or finished).
    Reset,
}
