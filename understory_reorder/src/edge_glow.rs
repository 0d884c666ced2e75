// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Accumulated overscroll glow at the top and bottom edges.
///
/// Each pull is in `0.0..=1.0`; pulling a saturated edge has no effect.
///
/// The engine pulls an edge while the floating item is pinned against it
/// and autoscroll cannot move any further, and releases both edges when the
/// drag ends or the pressure stops. Hosts read the pulls to draw the effect.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeGlow {
    top: f64,
    bottom: f64,
}

impl EdgeGlow {
    /// Pull accumulated at the top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Pull accumulated at the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Whether either edge is pulled.
    #[must_use]
    pub fn is_pulled(&self) -> bool {
        self.top > 0.0 || self.bottom > 0.0
    }

    pub(crate) fn pull_top(&mut self, distance: f64) {
        self.top = (self.top + distance.abs()).min(1.0);
    }

    pub(crate) fn pull_bottom(&mut self, distance: f64) {
        self.bottom = (self.bottom + distance.abs()).min(1.0);
    }

    /// Releases both edges. Returns whether anything was pulled.
    pub(crate) fn release_both(&mut self) -> bool {
        let was_active = self.is_pulled();
        self.top = 0.0;
        self.bottom = 0.0;
        was_active
    }
}
