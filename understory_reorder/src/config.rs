// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the reorder engine.

use kurbo::Insets;

use crate::util::round_half_up;
use crate::{Easing, SettleParams, SwapSmoothing};

/// Which gestures may start a drag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragStartMode {
    /// Moving past the touch slop starts a drag.
    #[default]
    OnMove,
    /// Holding still until the long-press timeout starts a drag. Moving past
    /// the touch slop first abandons the press.
    OnLongPress,
    /// Either of the above, whichever happens first.
    Both,
}

impl DragStartMode {
    /// Whether movement past the touch slop starts a drag.
    #[must_use]
    pub const fn starts_on_move(self) -> bool {
        matches!(self, Self::OnMove | Self::Both)
    }

    /// Whether a long press starts a drag.
    #[must_use]
    pub const fn starts_on_long_press(self) -> bool {
        matches!(self, Self::OnLongPress | Self::Both)
    }
}

/// Edge autoscroll tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoscrollConfig {
    /// Fraction of the viewport height, at each edge, where autoscroll
    /// ramps up.
    pub edge_fraction: f64,
    /// Scroll step per frame at full acceleration, in density-independent
    /// pixels.
    pub speed: f64,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.3,
            speed: 25.0,
        }
    }
}

/// Configuration for a [`ReorderManager`](crate::ReorderManager).
///
/// All distances are in viewport units (typically physical pixels) unless
/// noted otherwise.
#[derive(Copy, Clone, Debug)]
pub struct ReorderConfig {
    /// Which gestures start a drag.
    pub start_mode: DragStartMode,
    /// Distance the pointer must travel before a move counts as a drag.
    pub touch_slop: f64,
    /// Multiplier applied to `touch_slop` for the autoscroll direction gate.
    pub scroll_touch_slop_factor: f64,
    /// Hold time before a long press starts a drag.
    pub long_press_timeout_ms: u64,
    /// Ratio between viewport units and density-independent pixels.
    pub display_density: f64,
    /// Edge autoscroll tuning.
    pub autoscroll: AutoscrollConfig,
    /// Settle-back duration for a half-height displacement.
    pub settle_duration_ms: u64,
    /// Settle-back curve.
    pub settle_easing: Easing,
    /// Displacements below this many density-independent pixels snap.
    pub settle_min_distance: f64,
    /// Settle durations at or below this snap.
    pub settle_min_duration_ms: u64,
    /// Curve mapping swap progress to neighbour displacement.
    pub swap_easing: Easing,
    /// Per-frame smoothing of the neighbour displacement.
    pub swap_smoothing: SwapSmoothing,
    /// Pull applied to an edge glow per frame of pressure, in
    /// density-independent units.
    pub edge_glow_strength: f64,
    /// Extra space around the floating snapshot (for example a shadow).
    pub overlay_padding: Insets,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            start_mode: DragStartMode::OnMove,
            touch_slop: 8.0,
            scroll_touch_slop_factor: 1.5,
            long_press_timeout_ms: 500,
            display_density: 1.0,
            autoscroll: AutoscrollConfig::default(),
            settle_duration_ms: 200,
            settle_easing: Easing::Decelerate,
            settle_min_distance: 2.0,
            settle_min_duration_ms: 20,
            swap_easing: Easing::SWAP_TARGET,
            swap_smoothing: SwapSmoothing::default(),
            edge_glow_strength: 0.005,
            overlay_padding: Insets::ZERO,
        }
    }
}

impl ReorderConfig {
    /// Sets the start mode.
    #[must_use]
    pub fn with_start_mode(mut self, mode: DragStartMode) -> Self {
        self.start_mode = mode;
        self
    }

    /// Sets the touch slop.
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }

    /// Sets the long-press timeout.
    #[must_use]
    pub fn with_long_press_timeout(mut self, timeout_ms: u64) -> Self {
        self.long_press_timeout_ms = timeout_ms;
        self
    }

    /// Sets the display density. Non-positive values are ignored.
    #[must_use]
    pub fn with_display_density(mut self, density: f64) -> Self {
        if density > 0.0 {
            self.display_density = density;
        }
        self
    }

    /// Sets the autoscroll tuning.
    #[must_use]
    pub fn with_autoscroll(mut self, autoscroll: AutoscrollConfig) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    /// Sets the settle-back duration and curve.
    #[must_use]
    pub fn with_settle_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.settle_duration_ms = duration_ms;
        self.settle_easing = easing;
        self
    }

    /// Sets the swap-target curve.
    #[must_use]
    pub fn with_swap_easing(mut self, easing: Easing) -> Self {
        self.swap_easing = easing;
        self
    }

    /// Sets the swap-target smoothing.
    #[must_use]
    pub fn with_swap_smoothing(mut self, smoothing: SwapSmoothing) -> Self {
        self.swap_smoothing = smoothing;
        self
    }

    /// Sets the padding drawn around the floating snapshot.
    #[must_use]
    pub fn with_overlay_padding(mut self, padding: Insets) -> Self {
        self.overlay_padding = padding;
        self
    }

    /// Movement needed along one direction before autoscroll may scroll that way.
    #[must_use]
    pub fn scroll_touch_slop(&self) -> f64 {
        round_half_up(self.touch_slop * self.scroll_touch_slop_factor)
    }

    pub(crate) fn settle_params(&self) -> SettleParams {
        SettleParams {
            duration_ms: self.settle_duration_ms,
            easing: self.settle_easing,
            min_distance: self.settle_min_distance * self.display_density,
            min_duration_ms: self.settle_min_duration_ms,
        }
    }
}
