// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive types that sit above the host geometry crate.
//!
//! Geometric primitives (rectangles, points, containment, intersection)
//! come from `kurbo`, the same host math library used by the `understory`
//! family of crates for 2D work. This module adds only what `kurbo` does
//! not already provide: the opaque entry wrapper and the half-plane
//! primitive used by frustum queries.

use kurbo::{Point, Vec2};

pub use kurbo::Rect;

/// An axis-aligned rectangle paired with an opaque caller payload.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry<P> {
    pub(crate) payload: P,
    pub(crate) rect: Rect,
}

/// A half-plane used by [`crate::LooseQuadTree::get_within_frustum`].
///
/// Points are "inside" the half-plane when `normal.dot(p) <= offset`.
/// A convex region is the intersection of several half-planes; callers
/// typically build one per frustum edge or clip plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfPlane {
    /// Outward-facing normal of the plane.
    pub normal: Vec2,
    /// Signed offset along `normal`; points with `normal.dot(p) <= offset`
    /// are on the inside.
    pub offset: f64,
}

impl HalfPlane {
    /// Construct a half-plane from a normal and offset.
    pub const fn new(normal: Vec2, offset: f64) -> Self {
        Self { normal, offset }
    }

    #[inline]
    fn excludes(&self, p: Point) -> bool {
        self.normal.dot(Vec2::new(p.x, p.y)) > self.offset
    }
}

/// Whether `rect` is fully outside at least one plane in `planes` (and
/// therefore fully outside the convex region their intersection describes).
///
/// This is the standard conservative AABB/frustum test: a rectangle only
/// survives if every one of its four corners is on the inside of every
/// plane's complement fails for at least one corner per plane. False
/// positives (reporting "inside" for a rectangle that is actually fully
/// outside near a corner) are possible but false negatives are not, which
/// is what a culling pre-pass needs.
pub(crate) fn rect_outside_all(rect: Rect, planes: &[HalfPlane]) -> bool {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ];
    planes
        .iter()
        .any(|plane| corners.iter().all(|&c| plane.excludes(c)))
}
