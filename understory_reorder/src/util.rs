// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small float helpers that work without `std`.

/// Sign of `v`. Unlike `f64::signum`, zero and NaN map to zero.
#[inline]
pub(crate) fn signum(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Round a non-negative value to the nearest integer, halves rounding up.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "Pixel and millisecond magnitudes are far below 2^53."
)]
pub(crate) fn round_half_up(v: f64) -> f64 {
    if v <= 0.0 { 0.0 } else { (v + 0.5) as u64 as f64 }
}
