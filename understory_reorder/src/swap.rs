// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swap-target selection, swap hysteresis and neighbour displacement.

use kurbo::Rect;

use crate::{
    DraggableRange, Easing, HandleId, ItemId, RenderedItem, SettleAnimation, SettleParams,
    Viewport,
};

/// Finds the neighbour the floating item is moving toward.
///
/// Only the immediate neighbour in the direction of travel is considered:
/// the one above when the floating top is above the dragged item's slot,
/// the one below when it is below. Neighbours outside `range` are ignored.
pub fn find_swap_target<V: Viewport + ?Sized>(
    viewport: &V,
    len: usize,
    dragging: &RenderedItem,
    dragging_id: ItemId,
    floating_top: f64,
    range: &DraggableRange,
) -> Option<RenderedItem> {
    if dragging.item_id != Some(dragging_id) || dragging.position >= len {
        return None;
    }
    let position = dragging.position;
    let candidate = if floating_top < dragging.top() && position > 0 {
        viewport.item_at_position(position - 1)
    } else if floating_top > dragging.top() && position + 1 < len {
        viewport.item_at_position(position + 1)
    } else {
        None
    };
    candidate.filter(|c| range.contains(c.position))
}

/// Decides whether the dragged item should trade places with `to`.
///
/// For adjacent items the floating midpoint has to cross the midpoint of
/// the combined footprint of both items, so small jitter around a boundary
/// never toggles the order. Non-adjacent targets (which only appear after
/// the display fell behind a fast drag) swap unconditionally.
#[must_use]
pub fn should_swap(
    from: usize,
    to: usize,
    dragging_footprint: Rect,
    target_footprint: Rect,
    floating_mid: f64,
) -> bool {
    match from.abs_diff(to) {
        0 => false,
        1 => {
            let top = dragging_footprint.y0.min(target_footprint.y0);
            let bottom = dragging_footprint.y1.max(target_footprint.y1);
            let mid = top + (bottom - top) * 0.5;
            if to < from {
                floating_mid < mid
            } else {
                floating_mid > mid
            }
        }
        _ => true,
    }
}

/// Exponential smoothing of the swap-target phase between frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwapSmoothing {
    /// Weight of the requested phase in each step, in `0..=1`.
    pub factor: f64,
    /// Once within this distance of the requested phase, snap to it.
    pub snap_epsilon: f64,
}

impl Default for SwapSmoothing {
    fn default() -> Self {
        Self {
            factor: 0.3,
            snap_epsilon: 0.01,
        }
    }
}

impl SwapSmoothing {
    /// One smoothing step from `current` toward `requested`.
    #[must_use]
    pub fn step(&self, current: f64, requested: f64) -> f64 {
        let next = current * (1.0 - self.factor) + requested * self.factor;
        if (next - requested).abs() < self.snap_epsilon {
            requested
        } else {
            next
        }
    }
}

/// Progress of the floating item across `target`, in `0..=1`.
///
/// `0` means the target still sits in its own slot, `1` means it has fully
/// moved into the slot the dragged item left.
#[must_use]
pub fn swap_phase(dragging: &RenderedItem, target: &RenderedItem, floating_top: f64) -> f64 {
    let extent = target.decorated_extent();
    if extent <= 0.0 {
        return 0.0;
    }
    let progress = (dragging.top() - floating_top) / extent;
    let phase = if dragging.position > target.position {
        progress
    } else {
        1.0 + progress
    };
    phase.clamp(0.0, 1.0)
}

/// Slides the swap target out of the floating item's way.
#[derive(Clone, Debug)]
pub struct SwapTargetOperator {
    dragging_id: ItemId,
    range: DraggableRange,
    easing: Easing,
    smoothing: SwapSmoothing,
    dragging_extent: f64,
    translation_y: f64,
    /// Current target and whether it sits above the dragged item.
    target: Option<(HandleId, bool)>,
    requested_phase: f64,
    current_phase: f64,
}

impl SwapTargetOperator {
    pub(crate) fn new(
        dragging: &RenderedItem,
        dragging_id: ItemId,
        range: DraggableRange,
        easing: Easing,
        smoothing: SwapSmoothing,
    ) -> Self {
        Self {
            dragging_id,
            range,
            easing,
            smoothing,
            dragging_extent: dragging.decorated_extent(),
            translation_y: 0.0,
            target: None,
            requested_phase: 0.0,
            current_phase: 0.0,
        }
    }

    /// Handle of the current swap target.
    #[must_use]
    pub fn target(&self) -> Option<HandleId> {
        self.target.map(|(h, _)| h)
    }

    /// Phase computed from the latest floating position.
    #[must_use]
    pub fn requested_phase(&self) -> f64 {
        self.requested_phase
    }

    /// Smoothed phase currently applied to the target.
    #[must_use]
    pub fn current_phase(&self) -> f64 {
        self.current_phase
    }

    pub(crate) fn update(&mut self, translation_y: f64) {
        self.translation_y = translation_y;
    }

    fn displacement(&self, phase: f64, target_above: bool) -> f64 {
        let eased = self.easing.apply(phase);
        if target_above {
            eased * self.dragging_extent
        } else {
            (eased - 1.0) * self.dragging_extent
        }
    }

    /// Per-frame update: picks the target, smooths its phase and applies
    /// the resulting translation.
    pub(crate) fn on_frame<V: Viewport + ?Sized>(
        &mut self,
        viewport: &mut V,
        dragging_handle: Option<HandleId>,
        len: usize,
    ) {
        let Some(dragging) = dragging_handle.and_then(|h| viewport.item_for_handle(h)) else {
            return;
        };
        let target = find_swap_target(
            &*viewport,
            len,
            &dragging,
            self.dragging_id,
            self.translation_y,
            &self.range,
        );
        let previous = self.target();
        let next = target.map(|t| t.handle);
        if previous != next {
            if let Some(prev) = previous {
                viewport.set_item_translation(prev, 0.0);
            }
        }
        self.target = target.map(|t| (t.handle, dragging.position > t.position));
        let Some(target) = target else {
            return;
        };
        self.requested_phase = swap_phase(&dragging, &target, self.translation_y);
        self.current_phase = if previous != next {
            self.requested_phase
        } else {
            self.smoothing
                .step(self.current_phase, self.requested_phase)
        };
        let above = dragging.position > target.position;
        viewport.set_item_translation(target.handle, self.displacement(self.current_phase, above));
    }

    /// Applies the final phase and hands the target to a settle animation.
    pub(crate) fn finish<V: Viewport + ?Sized>(
        self,
        viewport: &mut V,
        params: &SettleParams,
    ) -> Option<SettleAnimation> {
        let (handle, above) = self.target?;
        let item = viewport.item_for_handle(handle)?;
        let dy = self.displacement(self.current_phase, above);
        SettleAnimation::begin(viewport, handle, dy, item.height(), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Insets;

    fn row(position: usize, top: f64, height: f64) -> RenderedItem {
        RenderedItem {
            handle: HandleId(position as u64),
            position,
            item_id: Some(ItemId(position as u64)),
            bounds: Rect::new(0.0, top, 100.0, top + height),
            translation_y: 0.0,
            margins: Insets::ZERO,
            decoration: Insets::ZERO,
        }
    }

    #[test]
    fn adjacent_swap_needs_the_shared_midpoint() {
        let d = row(2, 80.0, 40.0).footprint();
        let below = row(3, 120.0, 40.0).footprint();
        // Combined footprint spans 80..160, midpoint 120.
        assert!(!should_swap(2, 3, d, below, 119.9));
        assert!(!should_swap(2, 3, d, below, 120.0));
        assert!(should_swap(2, 3, d, below, 120.1));

        let above = row(1, 40.0, 40.0).footprint();
        assert!(!should_swap(2, 1, d, above, 80.0));
        assert!(should_swap(2, 1, d, above, 79.9));
    }

    #[test]
    fn midpoint_accounts_for_unequal_heights() {
        let d = row(0, 0.0, 20.0).footprint();
        let tall = row(1, 20.0, 100.0).footprint();
        assert!(!should_swap(0, 1, d, tall, 60.0));
        assert!(should_swap(0, 1, d, tall, 61.0));
    }

    #[test]
    fn distant_targets_always_swap() {
        let d = row(2, 80.0, 40.0).footprint();
        let far = row(5, 200.0, 40.0).footprint();
        assert!(should_swap(2, 5, d, far, 0.0));
        assert!(!should_swap(2, 2, d, d, 1000.0));
    }

    #[test]
    fn phase_tracks_coverage() {
        let d = row(2, 80.0, 40.0);
        let below = row(3, 120.0, 40.0);
        assert_eq!(swap_phase(&d, &below, 80.0), 1.0);
        assert_eq!(swap_phase(&d, &below, 100.0), 0.5);
        assert_eq!(swap_phase(&d, &below, 130.0), 0.0);
        let above = row(1, 40.0, 40.0);
        assert_eq!(swap_phase(&d, &above, 80.0), 0.0);
        assert_eq!(swap_phase(&d, &above, 60.0), 0.5);
    }

    #[test]
    fn smoothing_converges_and_snaps() {
        let s = SwapSmoothing::default();
        let mut cur = 0.0;
        let mut steps = 0;
        while cur != 1.0 {
            cur = s.step(cur, 1.0);
            steps += 1;
            assert!(steps < 100);
        }
        assert!(steps > 1);
    }
}
