// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crate-wide constants and small geometry helpers that don't belong on a
//! specific type.

use kurbo::{Point, Rect};

/// Entries a leaf tolerates before it splits, unless splitting would breach
/// `min_size`.
pub const CAPACITY: usize = 8;

/// Maximum number of consecutive world-growth attempts `add` will make
/// before giving up on an insertion.
pub(crate) const GROW_ATTEMPT_LIMIT: u32 = 20;

/// The midpoint of a rectangle's corners.
///
/// Kept as a free function rather than relying on `Rect::center` so the
/// "closed, inclusive" semantics used throughout this crate stay explicit
/// and independent of `kurbo`'s own rounding conventions.
#[inline]
pub(crate) fn rect_center(r: Rect) -> Point {
    Point::new((r.x0 + r.x1) * 0.5, (r.y0 + r.y1) * 0.5)
}

/// Build the loose rectangle (side `side_len`, centred at `center`).
#[inline]
pub(crate) fn loose_rect(center: Point, side_len: f64) -> Rect {
    let half = side_len * 0.5;
    Rect::new(
        center.x - half,
        center.y - half,
        center.x + half,
        center.y + half,
    )
}

/// Whether `outer` fully contains `inner` (both corners inside, closed
/// regions — touching an edge still counts as contained).
#[inline]
pub(crate) fn encapsulates(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && outer.x1 >= inner.x1 && outer.y1 >= inner.y1
}

/// Whether two closed rectangles overlap, including the case where they
/// merely share an edge.
#[inline]
pub(crate) fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// Fixed quadrant numbering: `0` top-left, `1` top-right, `2` bottom-left,
/// `3` bottom-right. Ties on the center go to the lower-numbered child.
///
/// `index = (p.x <= c.x ? 0 : 1) + (p.y >= c.y ? 0 : 2)`
#[inline]
pub(crate) fn quadrant_of(point: Point, center: Point) -> usize {
    let horiz = usize::from(point.x > center.x);
    let vert = usize::from(point.y < center.y) * 2;
    horiz + vert
}

/// The center a child at `quadrant` would have, given the parent's center
/// and `base_length` (pre-looseness side length).
#[inline]
pub(crate) fn quadrant_center(parent_center: Point, parent_base_length: f64, quadrant: usize) -> Point {
    let offset = parent_base_length / 4.0;
    let dx = if quadrant & 1 != 0 { offset } else { -offset };
    let dy = if quadrant & 2 != 0 { -offset } else { offset };
    Point::new(parent_center.x + dx, parent_center.y + dy)
}
