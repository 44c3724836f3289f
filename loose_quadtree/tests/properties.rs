// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests covering the ten invariants the tree maintains
//! across arbitrary insert/remove sequences, plus the seed scenarios
//! spelled out alongside them.

use kurbo::{Point, Rect};
use loose_quadtree::LooseQuadTree;
use proptest::prelude::*;

const INITIAL_SIZE: f64 = 10.0;
const MIN_SIZE: f64 = 1.0;
const LOOSENESS: f64 = 1.25;

fn fresh_tree<P: Copy + PartialEq + std::fmt::Debug>() -> LooseQuadTree<P> {
    LooseQuadTree::new(Point::new(0.0, 0.0), INITIAL_SIZE, MIN_SIZE, LOOSENESS)
}

fn small_rect() -> impl Strategy<Value = Rect> {
    (-50.0_f64..50.0, -50.0_f64..50.0, 0.1_f64..3.0, 0.1_f64..3.0).prop_map(|(x, y, w, h)| {
        Rect::new(x, y, x + w, y + h)
    })
}

fn brute_force_overlap(entries: &[(u32, Rect)], query: Rect) -> Vec<u32> {
    entries
        .iter()
        .filter(|(_, r)| r.x0 <= query.x1 && r.x1 >= query.x0 && r.y0 <= query.y1 && r.y1 >= query.y0)
        .map(|(p, _)| *p)
        .collect()
}

proptest! {
    /// Invariant 6: insert/query agreement, checked against a brute-force
    /// overlap scan over every inserted rectangle.
    #[test]
    fn insert_query_agreement(
        entries in prop::collection::vec((0_u32..200, small_rect()), 0..40),
        query in small_rect(),
    ) {
        let mut tree = fresh_tree();
        let mut unique = Vec::new();
        for (payload, rect) in &entries {
            if !unique.iter().any(|(p, _)| p == payload) {
                unique.push((*payload, *rect));
                tree.add(*payload, *rect);
            }
        }

        let mut expected = brute_force_overlap(&unique, query);
        let mut got = tree.get_colliding(query);
        expected.sort_unstable();
        got.sort_unstable();
        prop_assert_eq!(expected, got);
    }

    /// Invariant 3: `count()` always equals the number of distinct payloads
    /// currently indexed, across an interleaved sequence of adds and
    /// removes.
    #[test]
    fn count_matches_live_entries(
        ops in prop::collection::vec(
            (0_u32..30, small_rect(), any::<bool>()),
            0..60,
        ),
    ) {
        let mut tree = fresh_tree();
        let mut live = std::collections::BTreeSet::new();
        for (payload, rect, is_add) in ops {
            if is_add {
                if live.insert(payload) {
                    tree.add(payload, rect);
                }
            } else if live.remove(&payload) {
                tree.remove(payload);
            }
        }
        prop_assert_eq!(tree.count(), live.len());
    }

    /// Invariant 7: adding then removing a single entry restores `count`
    /// and drops it from every query.
    #[test]
    fn add_remove_round_trips(rect in small_rect()) {
        let mut tree = fresh_tree();
        let before = tree.count();
        tree.add(1_u32, rect);
        prop_assert!(tree.remove(1));
        prop_assert_eq!(tree.count(), before);
        prop_assert!(tree.get_colliding(rect).is_empty());
    }

    /// Invariant 10: the root never shrinks below the size the tree was
    /// constructed with, no matter how many adds and removes happen.
    #[test]
    fn root_never_shrinks_below_initial_size(
        ops in prop::collection::vec((0_u32..20, small_rect(), any::<bool>()), 0..40),
    ) {
        let mut tree = fresh_tree();
        let mut live = std::collections::BTreeSet::new();
        for (payload, rect, is_add) in ops {
            if is_add {
                if live.insert(payload) {
                    tree.add(payload, rect);
                }
            } else if live.remove(&payload) {
                tree.remove(payload);
            }
            prop_assert!(tree.max_rect().width() >= INITIAL_SIZE);
            prop_assert!(tree.max_rect().height() >= INITIAL_SIZE);
        }
    }

    /// Invariant 9: growing strictly enlarges the root's loose rectangle.
    #[test]
    fn grow_strictly_enlarges_root(far_x in 100.0_f64..10_000.0, far_y in 100.0_f64..10_000.0) {
        let mut tree = fresh_tree();
        let before = tree.max_rect();
        tree.add(1_u32, Rect::new(far_x, far_y, far_x + 1.0, far_y + 1.0));
        let after = tree.max_rect();
        prop_assert!(after.x0 <= before.x0);
        prop_assert!(after.y0 <= before.y0);
        prop_assert!(after.x1 >= before.x1);
        prop_assert!(after.y1 >= before.y1);
        prop_assert!(after.width() > before.width() || after.height() > before.height());
    }
}

#[test]
fn s1_and_s2_point_cluster_query() {
    let mut tree = fresh_tree();
    tree.add("A", Rect::new(0.5, 0.5, 1.5, 1.5));
    assert!(tree.is_colliding(Rect::new(0.75, 0.75, 1.25, 1.25)));
    assert_eq!(tree.count(), 1);
    assert!(!tree.is_colliding(Rect::new(4.95, 4.95, 5.05, 5.05)));
}

#[test]
fn s3_add_then_remove_clears_tree() {
    let mut tree = fresh_tree();
    tree.add("A", Rect::new(0.5, 0.5, 1.5, 1.5));
    assert!(tree.remove("A"));
    assert_eq!(tree.count(), 0);
    assert!(!tree.is_colliding(Rect::new(-100.0, -100.0, 100.0, 100.0)));
}

#[test]
fn s4_nine_disjoint_rects_force_a_split() {
    let mut tree = fresh_tree();
    let mut inserted = Vec::new();
    for i in 0..9 {
        let x = 1.5 + (i as f64) * 0.12;
        let y = 1.5 + (i as f64) * 0.12;
        let rect = Rect::new(x, y, x + 0.1, y + 0.1);
        tree.add(i, rect);
        inserted.push(i);
    }
    let cluster = Rect::new(1.4, 1.4, 3.0, 3.0);
    let mut got = tree.get_colliding(cluster);
    got.sort_unstable();
    assert_eq!(got, inserted);
}

#[test]
fn s5_removing_all_of_a_split_cluster_shrinks_root_to_floor() {
    let mut tree = fresh_tree();
    for i in 0..9 {
        let x = 1.5 + (i as f64) * 0.12;
        let y = 1.5 + (i as f64) * 0.12;
        tree.add(i, Rect::new(x, y, x + 0.1, y + 0.1));
    }
    for i in 0..9 {
        assert!(tree.remove(i));
    }
    assert_eq!(tree.count(), 0);
    assert_eq!(tree.max_rect().width(), INITIAL_SIZE * LOOSENESS);
}

#[test]
fn s6_far_insertion_grows_in_fewer_than_twenty_steps() {
    let mut tree = fresh_tree();
    tree.add("X", Rect::new(999.5, 999.5, 1000.5, 1000.5));
    assert_eq!(tree.count(), 1);
    assert!(tree.is_colliding(Rect::new(999.5, 999.5, 1000.5, 1000.5)));
    // `base_length` doubles each grow step starting from INITIAL_SIZE; the
    // tree must have covered a coordinate near 1000 in well under 20
    // doublings (2^13 * 10 already exceeds 1000).
    assert!(tree.max_rect().width() < INITIAL_SIZE * 2_f64.powi(20));
}

#[test]
fn s7_hundred_random_rects_match_brute_force() {
    let mut tree = fresh_tree();
    let mut entries = Vec::new();
    // A fixed, deterministic pseudo-random sequence (no external RNG
    // dependency): a linear congruential generator reduced to the
    // coordinate ranges used elsewhere in this file.
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        ((state >> 33) as u32) as f64 / u32::MAX as f64
    };
    for i in 0..100_u32 {
        let x = next() * 100.0 - 50.0;
        let y = next() * 100.0 - 50.0;
        let w = next() * 2.0 + 0.1;
        let h = next() * 2.0 + 0.1;
        let rect = Rect::new(x, y, x + w, y + h);
        tree.add(i, rect);
        entries.push((i, rect));
    }

    for (_, query) in &entries {
        let mut expected = brute_force_overlap(&entries, *query);
        let mut got = tree.get_colliding(*query);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(expected, got);
    }
}
