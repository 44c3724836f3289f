// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive node implementation: the self-reshaping core of the tree.
//!
//! A node stores entries that fit inside its loose rectangle but not
//! entirely inside any one of its four potential children (the maximal
//! depth invariant), and owns up to four children in the fixed quadrant
//! order documented on [`quadrant_of`][crate::util::quadrant_of]. There are
//! no parent pointers: every operation either returns a value to its
//! caller or mutates `self` and its descendants, never a sibling or an
//! ancestor.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::types::{Entry, HalfPlane, rect_outside_all};
use crate::util::{CAPACITY, encapsulates, loose_rect, quadrant_center, quadrant_of, rect_center, rects_overlap};

pub(crate) struct Node<P> {
    base_length: f64,
    center: Point,
    rect: Rect,
    min_size: f64,
    looseness: f64,
    entries: SmallVec<[Entry<P>; CAPACITY]>,
    children: Option<Box<[Node<P>; 4]>>,
    child_rects: [Rect; 4],
}

impl<P: fmt::Debug> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("rect", &self.rect)
            .field("entries", &self.len())
            .field("is_leaf", &self.children.is_none())
            .finish_non_exhaustive()
    }
}

impl<P> Node<P> {
    /// Entries at this node plus its direct children's entries, without
    /// recursing into grandchildren. What `should_merge` compares against
    /// `CAPACITY`, and what `Debug` reports.
    fn len(&self) -> usize {
        self.entries.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(|child| child.entries.len()).sum())
    }
}

impl<P: Copy + PartialEq> Node<P> {
    pub(crate) fn new(center: Point, base_length: f64, min_size: f64, looseness: f64) -> Self {
        let mut node = Self {
            base_length,
            center,
            rect: Rect::ZERO,
            min_size,
            looseness,
            entries: SmallVec::new(),
            children: None,
            child_rects: [Rect::ZERO; 4],
        };
        node.recompute_geometry();
        node
    }

    fn recompute_geometry(&mut self) {
        self.rect = loose_rect(self.center, self.base_length * self.looseness);
        let child_base = self.base_length / 2.0;
        let child_adj = child_base * self.looseness;
        self.child_rects = core::array::from_fn(|i| {
            loose_rect(quadrant_center(self.center, self.base_length, i), child_adj)
        });
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn center(&self) -> Point {
        self.center
    }

    pub(crate) fn base_length(&self) -> f64 {
        self.base_length
    }

    pub(crate) fn child_rect(&self, quadrant: usize) -> Rect {
        self.child_rects[quadrant]
    }

    /// Whether this node currently has no children (a leaf).
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether this node or any descendant holds at least one entry.
    pub(crate) fn has_any_entries(&self) -> bool {
        !self.entries.is_empty()
            || self
                .children
                .as_ref()
                .is_some_and(|c| c.iter().any(Self::has_any_entries))
    }

    /// Total entries reachable from this node. Used by tests to check the
    /// tree's maintained `count` against the actual contents.
    #[cfg(test)]
    pub(crate) fn total_entries(&self) -> usize {
        self.entries.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(Self::total_entries).sum())
    }

    /// Install four freshly built children on this node.
    ///
    /// Unlike the source this is modelled on, the slot count is part of the
    /// type (`[Node<P>; 4]`), so the "wrong arity" diagnostic spec.md
    /// describes cannot actually occur here — the compiler rejects it.
    fn set_children(&mut self, children: [Node<P>; 4]) {
        self.children = Some(Box::new(children));
    }

    /// Install `child` wholesale at `quadrant`, splitting this (freshly
    /// built, still childless) node first if needed. Used only when
    /// growing the tree: the previous root is grafted in below the new one
    /// without walking or re-inserting its entries.
    pub(crate) fn graft_child(&mut self, quadrant: usize, child: Node<P>) {
        if self.children.is_none() {
            self.split();
        }
        if let Some(children) = self.children.as_mut() {
            children[quadrant] = child;
        }
    }

    /// Returns `false` iff `rect` is not fully contained in this node's
    /// loose rectangle.
    pub(crate) fn add(&mut self, payload: P, rect: Rect) -> bool {
        if !encapsulates(self.rect, rect) {
            return false;
        }
        self.sub_add(payload, rect);
        true
    }

    fn sub_add(&mut self, payload: P, rect: Rect) {
        if self.children.is_none() {
            if self.entries.len() < CAPACITY || self.base_length / 2.0 < self.min_size {
                self.entries.push(Entry { payload, rect });
                return;
            }
            self.split();

            let stale = core::mem::take(&mut self.entries);
            for entry in stale {
                let q = quadrant_of(rect_center(entry.rect), self.center);
                let child = &mut self.children.as_mut().expect("just split")[q];
                if encapsulates(child.rect, entry.rect) {
                    child.sub_add(entry.payload, entry.rect);
                } else {
                    self.entries.push(entry);
                }
            }
        }

        let q = quadrant_of(rect_center(rect), self.center);
        let child = &mut self.children.as_mut().expect("children installed above")[q];
        if encapsulates(child.rect, rect) {
            child.sub_add(payload, rect);
        } else {
            self.entries.push(Entry { payload, rect });
        }
    }

    fn split(&mut self) {
        let child_base = self.base_length / 2.0;
        let children = core::array::from_fn(|i| {
            Node::new(
                quadrant_center(self.center, self.base_length, i),
                child_base,
                self.min_size,
                self.looseness,
            )
        });
        self.set_children(children);
    }

    /// Linear scan of local entries; if not found, recurse into every
    /// child until found. Checks `should_merge` on the way back out of
    /// every level a removal touched.
    pub(crate) fn remove(&mut self, payload: P) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.payload == payload) {
            self.entries.remove(pos);
            self.try_merge();
            return true;
        }
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.remove(payload) {
                    self.try_merge();
                    return true;
                }
            }
        }
        false
    }

    /// Fast removal: short-circuits on containment, then scans local
    /// entries before recursing into the single child that could hold
    /// `rect` (by invariant 1, at most one can).
    pub(crate) fn remove_rect(&mut self, payload: P, rect: Rect) -> bool {
        if !encapsulates(self.rect, rect) {
            return false;
        }
        self.sub_remove(payload, rect)
    }

    fn sub_remove(&mut self, payload: P, rect: Rect) -> bool {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.payload == payload && e.rect == rect)
        {
            self.entries.remove(pos);
            self.try_merge();
            return true;
        }
        if let Some(children) = self.children.as_mut() {
            let q = quadrant_of(rect_center(rect), self.center);
            if encapsulates(children[q].rect, rect) {
                let removed = children[q].sub_remove(payload, rect);
                if removed {
                    self.try_merge();
                }
                return removed;
            }
        }
        false
    }

    fn try_merge(&mut self) {
        if self.should_merge() {
            self.merge();
        }
    }

    /// True iff the combined entry count at this node and its direct
    /// children is `<= CAPACITY`, and no child itself has children (a
    /// grandchild proves the subtree needed the extra depth).
    fn should_merge(&self) -> bool {
        let Some(children) = &self.children else {
            return false;
        };
        if children.iter().any(|c| c.children.is_some()) {
            return false;
        }
        self.len() <= CAPACITY
    }

    fn merge(&mut self) {
        let Some(children) = self.children.take() else {
            return;
        };
        for child in *children {
            self.entries.extend(child.entries);
        }
    }

    pub(crate) fn is_colliding(&self, query: Rect) -> bool {
        if !rects_overlap(self.rect, query) {
            return false;
        }
        if self.entries.iter().any(|e| rects_overlap(e.rect, query)) {
            return true;
        }
        self.children
            .as_ref()
            .is_some_and(|c| c.iter().any(|child| child.is_colliding(query)))
    }

    pub(crate) fn get_colliding(&self, query: Rect, out: &mut Vec<P>) {
        if !rects_overlap(self.rect, query) {
            return;
        }
        out.extend(
            self.entries
                .iter()
                .filter(|e| rects_overlap(e.rect, query))
                .map(|e| e.payload),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.get_colliding(query, out);
            }
        }
    }

    pub(crate) fn get_within_frustum(&self, planes: &[HalfPlane], out: &mut Vec<P>) {
        if rect_outside_all(self.rect, planes) {
            return;
        }
        out.extend(
            self.entries
                .iter()
                .filter(|e| !rect_outside_all(e.rect, planes))
                .map(|e| e.payload),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.get_within_frustum(planes, out);
            }
        }
    }

    /// Attempt to collapse this node (called only on the root). Returns the
    /// node that should now be the root — either `self` (unchanged or
    /// mutated in place) or a single child.
    pub(crate) fn shrink_if_possible(mut self, initial_size: f64) -> Self {
        if self.base_length < 2.0 * initial_size {
            return self;
        }
        if !self.has_any_entries() {
            return self;
        }

        let mut target: Option<usize> = None;
        for entry in &self.entries {
            let q = quadrant_of(rect_center(entry.rect), self.center);
            match target {
                None => target = Some(q),
                Some(t) if t != q => return self,
                _ => {}
            }
            if !encapsulates(self.child_rects[q], entry.rect) {
                return self;
            }
        }

        if let Some(children) = &self.children {
            let mut nonempty = None;
            for (i, child) in children.iter().enumerate() {
                if child.has_any_entries() {
                    if nonempty.is_some() {
                        return self;
                    }
                    nonempty = Some(i);
                }
            }
            match (target, nonempty) {
                (Some(t), Some(ne)) if t != ne => return self,
                (None, Some(ne)) => target = Some(ne),
                _ => {}
            }
        }

        let Some(q) = target else {
            return self;
        };

        match self.children.take() {
            None => {
                self.base_length /= 2.0;
                self.center = rect_center(self.child_rects[q]);
                self.recompute_geometry();
                self
            }
            Some(children) => {
                let [c0, c1, c2, c3] = *children;
                match q {
                    0 => c0,
                    1 => c1,
                    2 => c2,
                    _ => c3,
                }
            }
        }
    }
}
