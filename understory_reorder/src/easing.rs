// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for settle animations and swap-target displacement.

/// Maps a normalized progress `t` in `0..=1` to an eased value.
///
/// Inputs outside `0..=1` are clamped before the curve is applied.
#[derive(Copy, Clone, Debug)]
pub enum Easing {
    /// `f(t) = t`.
    Linear,
    /// Quadratic ease-out, `f(t) = 1 - (1 - t)^2`.
    Decelerate,
    /// Dead-zone curve for swap targets.
    ///
    /// Stays at `0` for `t < threshold`, at `1` for `t > 1 - threshold`, and
    /// rises linearly in between. The neighbour therefore does not start
    /// moving until the dragged item has clearly begun to cover it.
    SwapTarget {
        /// Width of each dead zone, in `0..0.5`.
        threshold: f64,
    },
    /// Caller-supplied curve.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// The default swap-target curve, with a `0.3` dead zone at each end.
    pub const SWAP_TARGET: Self = Self::SwapTarget { threshold: 0.3 };

    /// Evaluates the curve at `t`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Self::SwapTarget { threshold } => {
                let half_span = 0.5 - threshold;
                if half_span > 0.0 && (t - 0.5).abs() < half_span {
                    (t - threshold) / (2.0 * half_span)
                } else if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::Decelerate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_target_has_dead_zones() {
        let e = Easing::SWAP_TARGET;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.29), 0.0);
        assert_eq!(e.apply(0.71), 1.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.4) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn degenerate_threshold_is_a_step() {
        let e = Easing::SwapTarget { threshold: 0.5 };
        assert_eq!(e.apply(0.49), 0.0);
        assert_eq!(e.apply(0.51), 1.0);
    }

    #[test]
    fn decelerate_is_monotonic_and_pinned() {
        let e = Easing::Decelerate;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        let mut last = 0.0;
        for i in 1..=10 {
            let v = e.apply(f64::from(i) / 10.0);
            assert!(v > last);
            last = v;
        }
        assert!(e.apply(0.5) > 0.5);
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        fn half(t: f64) -> f64 {
            t * 0.5
        }
        assert_eq!(Easing::Custom(half).apply(3.0), 0.5);
    }
}
