// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-offset tracking for in-flight drags.
//!
//! While a drag is live, any scrollable ancestor of the dragged element may
//! scroll (user wheel, programmatic, or caller-driven auto-scroll). The
//! pointer-derived delta alone then no longer describes where the dragged
//! rect should render: the element's coordinate frame moved underneath it.
//!
//! [`ScrollAccumulator`] closes that gap. The session coordinator observes
//! each ancestor's scroll offset at drag start and again on every scroll
//! event; [`ScrollAccumulator::total`] is the summed movement since start,
//! which the coordinator adds to the pointer delta.
//!
//! [`scroll_intent`] is the companion helper for driving auto-scroll: given
//! the pointer and a container rect it reports a per-axis urgency in
//! `[-1, 1]`. The caller owns the actual scrolling.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

/// Accumulated scroll deltas for a set of scrollable ancestors.
///
/// Keys are caller-chosen identifiers for the ancestors of the active
/// draggable (indices into its ancestor chain work fine). The set is small,
/// so entries live in a `Vec` and are found by equality.
#[derive(Clone, Debug, Default)]
pub struct ScrollAccumulator<K: Copy + Eq> {
    entries: Vec<ScrollEntry<K>>,
}

#[derive(Clone, Copy, Debug)]
struct ScrollEntry<K> {
    key: K,
    start: Vec2,
    current: Vec2,
}

impl<K: Copy + Eq> ScrollAccumulator<K> {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records the scroll offset of ancestor `key`.
    ///
    /// The first observation of a key sets its baseline; later observations
    /// replace the current offset only, so the delta against the baseline
    /// grows as the ancestor scrolls.
    pub fn observe(&mut self, key: K, offset: Vec2) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.current = offset;
        } else {
            self.entries.push(ScrollEntry {
                key,
                start: offset,
                current: offset,
            });
        }
    }

    /// The summed scroll movement of all tracked ancestors since their
    /// baselines.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.entries
            .iter()
            .fold(Vec2::ZERO, |acc, e| acc + (e.current - e.start))
    }

    /// Forgets all tracked ancestors. Called when a session ends.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if no ancestors are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-axis auto-scroll urgency for a pointer near a container's edges.
///
/// Each component is in `[-1, 1]`: negative means "scroll toward the
/// container's start" (left/up), positive toward the end, zero means the
/// pointer is outside the activation margin. Magnitude grows linearly as
/// the pointer nears (or passes) the edge, reaching `1.0` at the edge
/// itself.
///
/// A non-positive `margin` disables the intent entirely.
///
/// ```rust
/// use dragline_geometry::scroll::scroll_intent;
/// use kurbo::{Point, Rect, Vec2};
///
/// let container = Rect::new(0.0, 0.0, 200.0, 100.0);
/// // Pointer well inside: no intent.
/// assert_eq!(scroll_intent(Point::new(100.0, 50.0), container, 20.0), Vec2::ZERO);
/// // Pointer at the right edge: full-strength rightward intent.
/// let v = scroll_intent(Point::new(200.0, 50.0), container, 20.0);
/// assert_eq!(v.x, 1.0);
/// assert_eq!(v.y, 0.0);
/// ```
#[must_use]
pub fn scroll_intent(pointer: Point, container: Rect, margin: f64) -> Vec2 {
    if margin <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        axis_intent(pointer.x, container.x0, container.x1, margin),
        axis_intent(pointer.y, container.y0, container.y1, margin),
    )
}

/// Net urgency on one axis: strength toward the max edge minus strength
/// toward the min edge. On containers narrower than two margins the zones
/// overlap and the nearer edge dominates.
fn axis_intent(p: f64, min: f64, max: f64, margin: f64) -> f64 {
    let toward_start = ((min + margin - p) / margin).clamp(0.0, 1.0);
    let toward_end = ((p - (max - margin)) / margin).clamp(0.0, 1.0);
    toward_end - toward_start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_totals_zero() {
        let acc = ScrollAccumulator::<u32>::new();
        assert!(acc.is_empty());
        assert_eq!(acc.total(), Vec2::ZERO);
    }

    #[test]
    fn first_observation_is_the_baseline() {
        let mut acc = ScrollAccumulator::new();
        acc.observe(0_u32, Vec2::new(100.0, 40.0));
        assert_eq!(acc.total(), Vec2::ZERO);
    }

    #[test]
    fn deltas_accumulate_against_the_baseline() {
        let mut acc = ScrollAccumulator::new();
        acc.observe(0_u32, Vec2::new(0.0, 100.0));
        acc.observe(0_u32, Vec2::new(0.0, 130.0));
        assert_eq!(acc.total(), Vec2::new(0.0, 30.0));

        // Further scrolling replaces the current offset, not the baseline.
        acc.observe(0_u32, Vec2::new(0.0, 160.0));
        assert_eq!(acc.total(), Vec2::new(0.0, 60.0));
    }

    #[test]
    fn multiple_ancestors_sum() {
        let mut acc = ScrollAccumulator::new();
        acc.observe(0_u32, Vec2::ZERO);
        acc.observe(1_u32, Vec2::new(50.0, 0.0));
        acc.observe(0_u32, Vec2::new(10.0, 5.0));
        acc.observe(1_u32, Vec2::new(45.0, 0.0));
        assert_eq!(acc.total(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut acc = ScrollAccumulator::new();
        acc.observe(7_u32, Vec2::ZERO);
        acc.observe(7_u32, Vec2::new(9.0, 9.0));
        acc.clear();
        assert!(acc.is_empty());
        assert_eq!(acc.total(), Vec2::ZERO);
    }

    #[test]
    fn intent_is_zero_in_the_middle() {
        let c = Rect::new(0.0, 0.0, 300.0, 300.0);
        assert_eq!(scroll_intent(Point::new(150.0, 150.0), c, 30.0), Vec2::ZERO);
    }

    #[test]
    fn intent_ramps_toward_the_edge() {
        let c = Rect::new(0.0, 0.0, 300.0, 300.0);
        let half = scroll_intent(Point::new(15.0, 150.0), c, 30.0);
        assert!((half.x - -0.5).abs() < 1e-9);
        let full = scroll_intent(Point::new(0.0, 150.0), c, 30.0);
        assert_eq!(full.x, -1.0);
    }

    #[test]
    fn intent_saturates_outside_the_container() {
        let c = Rect::new(0.0, 0.0, 300.0, 300.0);
        let v = scroll_intent(Point::new(350.0, 150.0), c, 30.0);
        assert_eq!(v.x, 1.0);
    }

    #[test]
    fn zero_margin_disables_intent() {
        let c = Rect::new(0.0, 0.0, 300.0, 300.0);
        assert_eq!(scroll_intent(Point::new(0.0, 0.0), c, 0.0), Vec2::ZERO);
    }
}
