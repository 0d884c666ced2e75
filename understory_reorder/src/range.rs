// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::ReorderError;

/// Inclusive span of display positions a dragged item may occupy.
///
/// A range always satisfies `start <= end`. It is checked against the item
/// count and the dragged position with [`DraggableRange::validate`] when a
/// drag starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DraggableRange {
    start: usize,
    end: usize,
}

impl DraggableRange {
    /// Creates a range covering `start..=end`.
    ///
    /// Returns [`ReorderError::InvertedRange`] when `start > end`.
    pub const fn new(start: usize, end: usize) -> Result<Self, ReorderError> {
        if start > end {
            return Err(ReorderError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range covering every item of a collection with `len` items.
    ///
    /// An empty collection yields `[0, 0]`.
    #[must_use]
    pub const fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
        }
    }

    /// First position in the range.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Last position in the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn span(&self) -> usize {
        (self.end - self.start).saturating_add(1)
    }

    /// Whether `position` lies in `start..=end`.
    #[must_use]
    pub const fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }

    /// Checks the range against a collection of `len` items and the position
    /// of the item about to be dragged.
    pub fn validate(&self, len: usize, position: usize) -> Result<(), ReorderError> {
        if self.end > len.saturating_sub(1) {
            return Err(ReorderError::RangeOutOfBounds { range: *self, len });
        }
        if !self.contains(position) {
            return Err(ReorderError::RangeExcludesItem {
                range: *self,
                position,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DraggableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
