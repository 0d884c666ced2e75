// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the reorder engine.

use crate::{DraggableRange, HandleId};

/// Contract violations detected while starting or running a drag.
///
/// These are programming errors on the host side (bad ranges, items without
/// identity, a display that fell out of sync). The engine never leaves a drag
/// half-started: when an error is returned, the engine is back in a
/// consistent state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// A range was constructed with `start > end`.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvertedRange {
        /// Requested first position.
        start: usize,
        /// Requested last position.
        end: usize,
    },
    /// A range ends past the last item.
    #[error("invalid range {range}: end must be below the item count {len}")]
    RangeOutOfBounds {
        /// The offending range.
        range: DraggableRange,
        /// Number of items in the source.
        len: usize,
    },
    /// A range does not contain the item being dragged.
    #[error("invalid range {range}: it does not contain the dragged item at {position}")]
    RangeExcludesItem {
        /// The offending range.
        range: DraggableRange,
        /// Display position of the item being dragged.
        position: usize,
    },
    /// The item has no stable identity and cannot be tracked while dragging.
    #[error("item at position {position} has no stable identity")]
    MissingItemId {
        /// Display position of the item.
        position: usize,
    },
    /// The dragged item was bound to a new handle before the old one was released.
    #[error("handle {new:?} was bound to the dragged item before {current:?} was released")]
    HandleAlreadyAssigned {
        /// Handle currently tracked for the dragged item.
        current: HandleId,
        /// Newly bound handle.
        new: HandleId,
    },
    /// A swap was requested from a slot that does not hold the dragged item.
    ///
    /// Usually caused by duplicate identities or by the display missing a
    /// change notification.
    #[error(
        "swap from {from} to {to} resolves to source position {resolved}, expected the drag origin {initial} (current {current}); duplicate identities or a missed update"
    )]
    TrackingMismatch {
        /// Display position the swap started from.
        from: usize,
        /// Display position the swap targets.
        to: usize,
        /// Source position `from` maps to.
        resolved: usize,
        /// Source position the drag started at.
        initial: usize,
        /// Display position of the dragged item before the swap.
        current: usize,
    },
}
