// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for position mapping, ranges and drags.
//!
//! 1. Display/source mapping is a permutation and the two directions invert.
//! 2. The dragged slot always maps back to the drag origin.
//! 3. Ranges are valid exactly when ordered, in bounds and containing the item.
//! 4. Jitter that never crosses a shared midpoint never swaps.
//! 5. A downward-only drag never moves the item up and never leaves its range.
//! 6. A committed drag leaves the source in the order the display showed.

mod common;

use common::{Event, Fixture, Rows};
use proptest::prelude::*;
use understory_reorder::{
    DraggableRange, ReorderConfig, ReorderError, display_to_source, source_to_display,
};

fn drag_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..64).prop_flat_map(|len| (Just(len), 0..len, 0..len))
}

proptest! {
    #[test]
    fn mapping_is_a_permutation((len, initial, current) in drag_strategy()) {
        let mut seen: Vec<usize> = (0..len)
            .map(|p| display_to_source(p, initial, current))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());
        for p in 0..len {
            let source = display_to_source(p, initial, current);
            prop_assert_eq!(source_to_display(source, initial, current), p);
        }
    }

    #[test]
    fn dragged_slot_maps_to_origin((len, initial, current) in drag_strategy()) {
        prop_assert_eq!(display_to_source(current, initial, current), initial);
        prop_assert_eq!(source_to_display(initial, initial, current), current);
        // Without displacement the mapping is the identity.
        for p in 0..len {
            prop_assert_eq!(display_to_source(p, initial, initial), p);
        }
    }

    #[test]
    fn range_validity(start in 0usize..20, end in 0usize..20, len in 1usize..20, pos in 0usize..20) {
        match DraggableRange::new(start, end) {
            Err(ReorderError::InvertedRange { .. }) => prop_assert!(start > end),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            Ok(range) => {
                prop_assert!(start <= end);
                let valid = end < len && start <= pos && pos <= end;
                prop_assert_eq!(range.validate(len, pos).is_ok(), valid);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn jitter_never_swaps(ys in prop::collection::vec(510.0f64..528.9, 1..40)) {
        let mut f = Fixture::five();
        f.down(500.0, 0);
        f.drag_to(509.0, 1);
        for (i, y) in ys.into_iter().enumerate() {
            let t = 2 + i as u64;
            f.drag_to(y, t);
            f.frame(t);
            prop_assert_eq!(f.manager.adapter().current_position(), Some(2));
        }
        f.up();
        prop_assert!(f.manager.source().moves.is_empty());
    }

    #[test]
    fn downward_drag_is_monotonic(
        steps in prop::collection::vec(0.0f64..30.0, 1..16),
        end in 2usize..5,
    ) {
        let rows = Rows { range: Some((0, end)), ..Rows::new(10..15) };
        let mut f = Fixture::centered(rows, ReorderConfig::default());
        f.down(500.0, 0);
        f.drag_to(510.0, 1);
        let mut y = 510.0;
        let mut last = 2;
        for (i, dy) in steps.into_iter().enumerate() {
            y += dy;
            let t = 2 + i as u64;
            f.drag_to(y, t);
            f.frame(t);
            let current = f.manager.adapter().current_position().unwrap();
            prop_assert!(current >= last);
            prop_assert!(current <= end);
            last = current;
        }
        f.up();
        let moves = f.manager.source().moves.clone();
        prop_assert!(moves.len() <= 1);
        if last != 2 {
            prop_assert_eq!(moves, vec![(2, last)]);
        }
    }

    #[test]
    fn commit_matches_the_displayed_order(
        ys in prop::collection::vec(400.0f64..600.0, 1..24),
        press in 0usize..5,
    ) {
        let mut f = Fixture::five();
        let y0 = 420.0 + 40.0 * press as f64;
        f.down(y0, 0);
        f.drag_to(y0 + 10.0, 1);
        for (i, y) in ys.into_iter().enumerate() {
            let t = 2 + i as u64;
            f.drag_to(y, t);
            f.frame(t);
        }
        let shown = f.display_ids();
        f.up();
        prop_assert!(f.manager.source().moves.len() <= 1);
        prop_assert_eq!(f.source_ids(), shown);
        let events = f.recorder.events();
        prop_assert_eq!(events.len(), 2);
        prop_assert_eq!(events[0], Event::Started(press));
        prop_assert!(matches!(events[1], Event::Finished(from, _, true) if from == press));
    }
}
