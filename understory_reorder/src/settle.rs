// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle-back animations for items released with a residual translation.

use crate::util::round_half_up;
use crate::{Easing, HandleId, Viewport};

/// Parameters shared by all settle animations.
#[derive(Copy, Clone, Debug)]
pub struct SettleParams {
    /// Duration for an item released a full half-height away from its slot.
    pub duration_ms: u64,
    /// Curve applied to the animation progress.
    pub easing: Easing,
    /// Translations at or below this distance snap instead of animating.
    pub min_distance: f64,
    /// Computed durations at or below this snap instead of animating.
    pub min_duration_ms: u64,
}

/// Animates one rendered item's translation back to zero.
#[derive(Copy, Clone, Debug)]
pub struct SettleAnimation {
    handle: HandleId,
    from: f64,
    duration_ms: u64,
    easing: Easing,
    started_at: Option<u64>,
}

impl SettleAnimation {
    /// Duration for an item displaced by `from` with the given height.
    ///
    /// Items close to their slot settle faster: the duration scales with
    /// `1 - t^2`, where `t = 1 - min(|from| / (height / 2), 1)`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Durations are small non-negative millisecond counts."
    )]
    pub fn duration_for(from: f64, item_height: f64, base_ms: u64) -> u64 {
        let half = item_height * 0.5;
        let proportion = if half > 0.0 {
            (from.abs() / half).min(1.0)
        } else {
            1.0
        };
        let t = 1.0 - proportion;
        round_half_up(base_ms as f64 * (1.0 - t * t)) as u64
    }

    /// Starts settling `handle` from translation `from`, or snaps it to zero
    /// when the move would be too short to be worth animating.
    pub(crate) fn begin<V: Viewport + ?Sized>(
        viewport: &mut V,
        handle: HandleId,
        from: f64,
        item_height: f64,
        params: &SettleParams,
    ) -> Option<Self> {
        let duration_ms = Self::duration_for(from, item_height, params.duration_ms);
        if duration_ms > params.min_duration_ms && from.abs() > params.min_distance {
            viewport.set_item_translation(handle, from);
            Some(Self {
                handle,
                from,
                duration_ms,
                easing: params.easing,
                started_at: None,
            })
        } else {
            viewport.set_item_translation(handle, 0.0);
            None
        }
    }

    /// Handle being animated.
    #[must_use]
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Translation the animation started from.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Total duration.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Translation `elapsed_ms` after the animation started.
    #[must_use]
    pub fn value_after(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return 0.0;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        self.from * (1.0 - self.easing.apply(t))
    }

    /// Advances to `now`. The first step fixes the start time. Returns
    /// whether the animation is still running.
    pub(crate) fn step<V: Viewport + ?Sized>(&mut self, viewport: &mut V, now: u64) -> bool {
        let started = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        let value = self.value_after(elapsed);
        viewport.set_item_translation(self.handle, value);
        elapsed < self.duration_ms
    }
}
