// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_collision --heading-base-level=0

//! Dragline Collision: pure strategies resolving the droppable under a drag.
//!
//! Every tick, the session coordinator asks a [`CollisionStrategy`] which
//! droppable the dragged element is "over". Strategies are pure functions
//! of a [`CollisionArgs`] snapshot — the dragged rect at its current
//! translation, the pointer position if the modality has one, and the
//! droppable rects in registration order — and return a ranked
//! [`Collision`] list, best first. An empty list means no target.
//!
//! Built-in strategies, mirroring the common trade-offs:
//!
//! - [`strategies::RectIntersection`]: most overlap wins; no overlap, no
//!   match. Predictable for large targets, unforgiving for thin ones.
//! - [`strategies::ClosestCenter`]: nearest center wins, even with zero
//!   overlap. Forgiving; ties keep registration order.
//! - [`strategies::ClosestCorners`]: nearest mean corner distance wins.
//!   Favors edge-adjacent targets, which reads better than center distance
//!   when small targets sit inside or beside large ones.
//! - [`strategies::PointerWithin`]: only droppables containing the pointer
//!   qualify; the smallest wins, so nested droppables resolve to the most
//!   specific container. Matches nothing for keyboard-driven drags.
//! - [`strategies::FirstMatch`]: combinator running a fallback when the
//!   primary finds nothing — e.g. pointer containment first, overlap as
//!   the safety net for fast pointer movement across thin targets.
//!
//! Custom strategies are ordinary closures: any
//! `Fn(&CollisionArgs<'_, Id>) -> Vec<Collision<Id>>` implements
//! [`CollisionStrategy`].
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_collision::strategies::RectIntersection;
//! use dragline_collision::{CollisionArgs, CollisionStrategy};
//! use kurbo::Rect;
//!
//! let droppables = [
//!     ("x", Rect::new(10.0, 10.0, 60.0, 60.0)),
//!     ("y", Rect::new(0.0, 200.0, 50.0, 250.0)),
//! ];
//! let args = CollisionArgs {
//!     active_rect: Rect::new(0.0, 0.0, 50.0, 50.0),
//!     pointer: None,
//!     droppables: &droppables,
//! };
//!
//! let hits = RectIntersection.detect(&args);
//! assert_eq!(hits[0].id, "x"); // overlaps
//! assert_eq!(hits.len(), 1);   // "y" does not
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod strategies;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use dragline_geometry::rect::corners;

/// One ranked match.
///
/// `score` is strategy-specific (an overlap ratio, a distance, an area) and
/// only comparable within the list that produced it. Position in the list
/// is the contract: the first entry is the resolved target.
#[derive(Clone, Debug, PartialEq)]
pub struct Collision<Id> {
    /// The matched droppable.
    pub id: Id,
    /// Strategy-specific score, documented per strategy.
    pub score: f64,
}

/// The snapshot a strategy scores against.
///
/// `droppables` is in registration order; strategies sort stably so equal
/// scores resolve to the earlier registration.
#[derive(Copy, Clone, Debug)]
pub struct CollisionArgs<'a, Id> {
    /// The dragged rect at its current translation.
    pub active_rect: Rect,
    /// Current pointer position; `None` for keyboard-driven sessions.
    pub pointer: Option<Point>,
    /// `(id, rect)` snapshot of the enabled droppables.
    pub droppables: &'a [(Id, Rect)],
}

/// Maps a drag snapshot to a ranked list of droppable matches.
pub trait CollisionStrategy<Id> {
    /// Ranked matches, best first; empty when nothing qualifies.
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>>;
}

impl<Id, F> CollisionStrategy<Id> for F
where
    F: Fn(&CollisionArgs<'_, Id>) -> Vec<Collision<Id>>,
{
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        self(args)
    }
}

/// Overlap ratio of `a` and `b`: intersection area over union area.
///
/// `0.0` for disjoint rects, `1.0` for identical ones.
#[must_use]
pub fn intersection_ratio(a: Rect, b: Rect) -> f64 {
    let w = (a.x1.min(b.x1) - a.x0.max(b.x0)).max(0.0);
    let h = (a.y1.min(b.y1) - a.y0.max(b.y0)).max(0.0);
    let intersection = w * h;
    if intersection <= 0.0 {
        return 0.0;
    }
    let union = a.area() + b.area() - intersection;
    intersection / union
}

/// Euclidean distance between the centers of `a` and `b`.
#[must_use]
pub fn center_distance(a: Rect, b: Rect) -> f64 {
    let d = a.center() - b.center();
    d.hypot()
}

/// Mean distance between the corresponding corners of `a` and `b`.
#[must_use]
pub fn corner_distance(a: Rect, b: Rect) -> f64 {
    let ca = corners(a);
    let cb = corners(b);
    let total: f64 = ca
        .iter()
        .zip(cb.iter())
        .map(|(pa, pb)| (*pa - *pb).hypot())
        .sum();
    total / 4.0
}
