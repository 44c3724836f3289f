// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loose Quadtree: a dynamic, self-reshaping 2D spatial index.
//!
//! A loose quadtree indexes axis-aligned rectangles (boxes) under an opaque
//! payload. Unlike a fixed-world quadtree, it grows on demand to cover
//! insertions outside its current bounds and shrinks back down once a
//! removal leaves it lopsided, without ever shrinking below the bounds it
//! was constructed with.
//!
//! "Loose" refers to the looseness factor: each node's effective bounding
//! rectangle is wider than its nominal quadrant by this factor, so a box
//! that merely brushes a quadrant boundary doesn't force a reshape on
//! every subsequent move. A looseness of `1.0` degrades to an ordinary
//! tight quadtree.
//!
//! - Insert and remove boxes with a user payload ([`LooseQuadTree::add`],
//!   [`LooseQuadTree::remove`], [`LooseQuadTree::remove_rect`]).
//! - Query by intersecting rectangle ([`LooseQuadTree::is_colliding`],
//!   [`LooseQuadTree::get_colliding`]).
//! - Query by convex region via half-planes
//!   ([`LooseQuadTree::get_within_frustum`]).
//!
//! It is generic over the payload type and depends on `kurbo` for its
//! geometric primitives ([`Rect`]); it does not implement its own.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use loose_quadtree::LooseQuadTree;
//!
//! let mut tree = LooseQuadTree::new(Point::new(0.0, 0.0), 256.0, 1.0, 1.25);
//!
//! let a = tree.add(1_u32, Rect::new(10.0, 10.0, 20.0, 20.0));
//! let b = tree.add(2_u32, Rect::new(15.0, 15.0, 30.0, 30.0));
//!
//! assert_eq!(tree.count(), 2);
//! assert!(tree.is_colliding(Rect::new(18.0, 18.0, 19.0, 19.0)));
//!
//! tree.remove(1);
//! assert_eq!(tree.count(), 1);
//! # let _ = (a, b);
//! ```
//!
//! Insertions outside the tree's current bounds grow it automatically:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use loose_quadtree::LooseQuadTree;
//!
//! let mut tree = LooseQuadTree::new(Point::new(0.0, 0.0), 8.0, 0.5, 1.0);
//! let far = Rect::new(1_000.0, 1_000.0, 1_001.0, 1_001.0);
//! tree.add(1_u32, far);
//! assert!(tree.max_rect().width() > 8.0);
//! assert!(tree.is_colliding(far));
//! ```
//!
//! Frustum-style culling narrows a query to a convex region described by
//! half-planes instead of a single rectangle:
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use loose_quadtree::{HalfPlane, LooseQuadTree};
//!
//! let mut tree = LooseQuadTree::new(Point::new(0.0, 0.0), 64.0, 1.0, 1.25);
//! tree.add(1_u32, Rect::new(1.0, 1.0, 2.0, 2.0));
//! tree.add(2_u32, Rect::new(-10.0, -10.0, -9.0, -9.0));
//!
//! // Keep only the half-plane x <= 0.
//! let planes = [HalfPlane::new(Vec2::new(1.0, 0.0), 0.0)];
//! let visible = tree.get_within_frustum(&planes);
//! assert_eq!(visible, vec![2]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `kurbo`'s `std` feature.
//! - `libm`: enables `kurbo`'s `libm` feature for `no_std` targets that
//!   still need transcendental functions (only `rect_center` and the
//!   midpoint arithmetic here use plain arithmetic, so most consumers of
//!   this crate specifically will not need it, but it is threaded through
//!   for parity with `kurbo` itself).
//!
//! ### Non-goals
//!
//! This crate indexes axis-aligned rectangles only; it does not do
//! rotated-box, circle, or polygon queries, does not provide ray casts, and
//! does not persist or serialize its tree. A point is modelled as a
//! zero-area rectangle (`x0 == x1`, `y0 == y1`) rather than as a distinct
//! type.

#![no_std]

extern crate alloc;

mod node;
mod tree;
mod types;
pub(crate) mod util;

/// The host geometry crate, re-exported so callers don't need to depend on
/// it directly to name [`Rect`] or build a [`kurbo::Point`] for
/// [`LooseQuadTree::new`].
pub use kurbo;
pub use kurbo::Rect;
pub use tree::LooseQuadTree;
pub use types::HalfPlane;
pub use util::CAPACITY;
