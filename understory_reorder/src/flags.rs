// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item drag state flags and change tracking.

bitflags::bitflags! {
    /// Drag state of one displayed item, as seen by its renderer.
    ///
    /// All bits are clear when no drag is in progress.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragStateFlags: u32 {
        /// A drag is in progress somewhere in the list.
        const DRAGGING = 1 << 0;
        /// This item is the one being dragged.
        const ACTIVE = 1 << 1;
        /// This item's position lies in the active draggable range.
        const IN_RANGE = 1 << 2;
        /// Some other bit differs from the last state handed to this item.
        const UPDATED = 1 << 31;
    }
}

/// Remembers the last flags handed to one rendered item so that
/// [`DragStateFlags::UPDATED`] can be derived.
///
/// Hosts keep one tracker per rendered item and reset it when the item is
/// recycled for different content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragStateTracker {
    last: Option<DragStateFlags>,
}

impl DragStateTracker {
    /// A tracker that has never seen any flags.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records `flags` and returns them with `UPDATED` set when they differ
    /// from the previous record (ignoring `UPDATED` itself), or when this is
    /// the first record.
    pub fn update(&mut self, flags: DragStateFlags) -> DragStateFlags {
        let flags = flags - DragStateFlags::UPDATED;
        let changed = match self.last {
            None => true,
            Some(prev) => !((prev ^ flags) - DragStateFlags::UPDATED).is_empty(),
        };
        let out = if changed {
            flags | DragStateFlags::UPDATED
        } else {
            flags
        };
        self.last = Some(out);
        out
    }

    /// The last recorded flags, if any.
    #[must_use]
    pub const fn last(&self) -> Option<DragStateFlags> {
        self.last
    }

    /// Forgets the last record; the next [`update`](Self::update) reports `UPDATED`.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
