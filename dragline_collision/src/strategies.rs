// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in collision strategies.

use alloc::vec::Vec;

use crate::{Collision, CollisionArgs, CollisionStrategy, center_distance, corner_distance,
            intersection_ratio};

/// Most overlap wins.
///
/// Scores are intersection-over-union ratios in `(0, 1]`, ranked
/// descending; zero-overlap candidates are excluded entirely.
#[derive(Copy, Clone, Debug, Default)]
pub struct RectIntersection;

impl<Id: Clone> CollisionStrategy<Id> for RectIntersection {
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        let mut hits: Vec<Collision<Id>> = args
            .droppables
            .iter()
            .filter_map(|(id, rect)| {
                let ratio = intersection_ratio(args.active_rect, *rect);
                (ratio > 0.0).then(|| Collision {
                    id: id.clone(),
                    score: ratio,
                })
            })
            .collect();
        // Stable: equal ratios keep registration order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }
}

/// Nearest center wins.
///
/// Scores are center-to-center distances, ranked ascending. Every
/// candidate matches, so this strategy always resolves a target when any
/// droppable exists — useful for sortable lists where "nothing is over"
/// would stall the reorder.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClosestCenter;

impl<Id: Clone> CollisionStrategy<Id> for ClosestCenter {
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        let mut hits: Vec<Collision<Id>> = args
            .droppables
            .iter()
            .map(|(id, rect)| Collision {
                id: id.clone(),
                score: center_distance(args.active_rect, *rect),
            })
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}

/// Nearest mean corner distance wins.
///
/// Like [`ClosestCenter`] but measured corner-to-corner, which favors
/// edge-adjacent targets over center-only proximity — more forgiving for
/// small targets next to large ones.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClosestCorners;

impl<Id: Clone> CollisionStrategy<Id> for ClosestCorners {
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        let mut hits: Vec<Collision<Id>> = args
            .droppables
            .iter()
            .map(|(id, rect)| Collision {
                id: id.clone(),
                score: corner_distance(args.active_rect, *rect),
            })
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}

/// Droppables containing the pointer, innermost (smallest area) first.
///
/// Scores are areas. Nested droppables resolve to the most specific
/// container rather than its ancestor. With no pointer in the snapshot
/// (keyboard sessions) nothing qualifies.
#[derive(Copy, Clone, Debug, Default)]
pub struct PointerWithin;

impl<Id: Clone> CollisionStrategy<Id> for PointerWithin {
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        let Some(pointer) = args.pointer else {
            return Vec::new();
        };
        let mut hits: Vec<Collision<Id>> = args
            .droppables
            .iter()
            .filter_map(|(id, rect)| {
                rect.contains(pointer).then(|| Collision {
                    id: id.clone(),
                    score: rect.area(),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}

/// Runs `primary`, falling back to `fallback` when it matches nothing.
///
/// The canonical chain prefers precise pointer containment but tolerates a
/// fast pointer skipping over thin targets:
///
/// ```rust
/// use dragline_collision::strategies::{FirstMatch, PointerWithin, RectIntersection};
///
/// let strategy = FirstMatch(PointerWithin, RectIntersection);
/// # let _ = strategy;
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstMatch<A, B>(pub A, pub B);

impl<Id, A, B> CollisionStrategy<Id> for FirstMatch<A, B>
where
    A: CollisionStrategy<Id>,
    B: CollisionStrategy<Id>,
{
    fn detect(&self, args: &CollisionArgs<'_, Id>) -> Vec<Collision<Id>> {
        let hits = self.0.detect(args);
        if hits.is_empty() {
            self.1.detect(args)
        } else {
            hits
        }
    }
}
