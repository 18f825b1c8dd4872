// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorting strategies: per-item transforms simulating a reorder.
//!
//! A strategy answers, for each rendered index, "where should this item
//! draw while the drag is in flight?" given the ordered rect snapshot of
//! the list and the active/over indices. `None` means untransformed — and
//! the active index is always `None`, because the dragged element renders
//! at the pointer-driven overlay position, not in the flow.

use kurbo::{Rect, Vec2};

use dragline_geometry::Transform;

use crate::order::array_move;

/// Computes the render transform for one item of a sortable list.
pub trait SortingStrategy {
    /// The transform for `index`, or `None` to leave it untouched.
    ///
    /// `rects` is the ordered rect snapshot for the list's items; indices
    /// outside it yield `None` rather than panicking (a cross-container
    /// placeholder has no measured rect yet).
    fn transform(
        &self,
        rects: &[Rect],
        active_index: usize,
        over_index: usize,
        index: usize,
    ) -> Option<Transform>;
}

/// One-slot shifts along the y axis.
///
/// Items strictly between the active and over positions (over inclusive)
/// shift opposite the drag direction by the active slot's extent — its
/// height plus the measured inter-item gap. Everything else stays put.
#[derive(Copy, Clone, Debug, Default)]
pub struct VerticalList;

impl SortingStrategy for VerticalList {
    fn transform(
        &self,
        rects: &[Rect],
        active_index: usize,
        over_index: usize,
        index: usize,
    ) -> Option<Transform> {
        if index == active_index {
            return None;
        }
        let active_rect = rects.get(active_index)?;
        let shift = active_rect.height() + gap(rects, index, active_index, Axis::Y);
        shifted(active_index, over_index, index, shift).map(|dy| Vec2::new(0.0, dy).into())
    }
}

/// One-slot shifts along the x axis; the mirror of [`VerticalList`].
#[derive(Copy, Clone, Debug, Default)]
pub struct HorizontalList;

impl SortingStrategy for HorizontalList {
    fn transform(
        &self,
        rects: &[Rect],
        active_index: usize,
        over_index: usize,
        index: usize,
    ) -> Option<Transform> {
        if index == active_index {
            return None;
        }
        let active_rect = rects.get(active_index)?;
        let shift = active_rect.width() + gap(rects, index, active_index, Axis::X);
        shifted(active_index, over_index, index, shift).map(|dx| Vec2::new(dx, 0.0).into())
    }
}

/// Measured rect diffs against the projected order.
///
/// Reorders the rect snapshot as the drop would reorder the items and
/// emits each item's positional delta. Because the deltas are measured,
/// this handles wrapping grids where a shift moves an item to another row
/// or column entirely.
#[derive(Copy, Clone, Debug, Default)]
pub struct RectGrid;

impl SortingStrategy for RectGrid {
    fn transform(
        &self,
        rects: &[Rect],
        active_index: usize,
        over_index: usize,
        index: usize,
    ) -> Option<Transform> {
        if index == active_index {
            return None;
        }
        // The slot layout after the move: the rect at the over position
        // migrates to the active position, shifting the span between them.
        let new_rects = array_move(rects, over_index, active_index);
        let old = rects.get(index)?;
        let new = new_rects.get(index)?;
        let delta = Vec2::new(new.x0 - old.x0, new.y0 - old.y0);
        (delta != Vec2::ZERO).then(|| delta.into())
    }
}

/// Signed one-slot membership: `Some(-shift)` for items displaced toward
/// the start, `Some(+shift)` toward the end, `None` outside the span.
fn shifted(active_index: usize, over_index: usize, index: usize, shift: f64) -> Option<f64> {
    if active_index < over_index && index > active_index && index <= over_index {
        Some(-shift)
    } else if active_index > over_index && index >= over_index && index < active_index {
        Some(shift)
    } else {
        None
    }
}

enum Axis {
    X,
    Y,
}

/// The gap between `index` and its flow neighbor on the side facing the
/// active item, falling back to the opposite neighbor at list edges.
fn gap(rects: &[Rect], index: usize, active_index: usize, axis: Axis) -> f64 {
    let Some(current) = rects.get(index) else {
        return 0.0;
    };
    let previous = index.checked_sub(1).and_then(|i| rects.get(i));
    let next = rects.get(index + 1);
    let (lead, trail) = match axis {
        Axis::X => (
            previous.map(|p| current.x0 - p.x1),
            next.map(|n| n.x0 - current.x1),
        ),
        Axis::Y => (
            previous.map(|p| current.y0 - p.y1),
            next.map(|n| n.y0 - current.y1),
        ),
    };
    if active_index < index {
        lead.or(trail).unwrap_or(0.0)
    } else {
        trail.or(lead).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Four 40px rows, stacked with a 10px gap.
    fn rows() -> Vec<Rect> {
        (0..4)
            .map(|i| {
                let top = i as f64 * 50.0;
                Rect::new(0.0, top, 100.0, top + 40.0)
            })
            .collect()
    }

    #[test]
    fn vertical_shifts_the_span_between_active_and_over() {
        let rects = rows();
        // Dragging index 0 over index 2.
        assert!(VerticalList.transform(&rects, 0, 2, 0).is_none());
        assert_eq!(VerticalList.transform(&rects, 0, 2, 1).unwrap().y, -50.0);
        assert_eq!(VerticalList.transform(&rects, 0, 2, 2).unwrap().y, -50.0);
        assert!(VerticalList.transform(&rects, 0, 2, 3).is_none());
    }

    #[test]
    fn vertical_shifts_down_when_dragging_backward() {
        let rects = rows();
        // Dragging index 3 over index 1.
        assert_eq!(VerticalList.transform(&rects, 3, 1, 1).unwrap().y, 50.0);
        assert_eq!(VerticalList.transform(&rects, 3, 1, 2).unwrap().y, 50.0);
        assert!(VerticalList.transform(&rects, 3, 1, 0).is_none());
        assert!(VerticalList.transform(&rects, 3, 1, 3).is_none());
    }

    #[test]
    fn vertical_active_index_is_never_transformed() {
        let rects = rows();
        assert!(VerticalList.transform(&rects, 1, 3, 1).is_none());
    }

    #[test]
    fn vertical_without_a_measured_active_rect_yields_none() {
        let rects = rows();
        // Active index beyond the snapshot (an unmeasured placeholder).
        assert!(VerticalList.transform(&rects, 4, 1, 2).is_none());
    }

    #[test]
    fn horizontal_mirrors_vertical_along_x() {
        let rects: Vec<Rect> = (0..3)
            .map(|i| {
                let left = i as f64 * 60.0;
                Rect::new(left, 0.0, left + 50.0, 40.0)
            })
            .collect();
        // Dragging index 2 over index 0: both others shift right one slot.
        let t = HorizontalList.transform(&rects, 2, 0, 0).unwrap();
        assert_eq!((t.x, t.y), (60.0, 0.0));
        assert_eq!(HorizontalList.transform(&rects, 2, 0, 1).unwrap().x, 60.0);
    }

    #[test]
    fn grid_diffs_against_the_projected_slot_layout() {
        // A 2x2 wrapping grid.
        let rects = [
            Rect::new(0.0, 0.0, 50.0, 50.0),    // slot 0
            Rect::new(60.0, 0.0, 110.0, 50.0),  // slot 1
            Rect::new(0.0, 60.0, 50.0, 110.0),  // slot 2
            Rect::new(60.0, 60.0, 110.0, 110.0) // slot 3
        ];
        // Dragging item 0 over item 3: items 1..=3 each step back one slot,
        // wrapping across rows.
        let t = RectGrid.transform(&rects, 0, 3, 1).unwrap();
        assert_eq!((t.x, t.y), (-60.0, 0.0)); // slot 1 -> slot 0
        let t = RectGrid.transform(&rects, 0, 3, 2).unwrap();
        assert_eq!((t.x, t.y), (60.0, -60.0)); // slot 2 -> slot 1 (wraps up)
        let t = RectGrid.transform(&rects, 0, 3, 3).unwrap();
        assert_eq!((t.x, t.y), (-60.0, 0.0)); // slot 3 -> slot 2
        assert!(RectGrid.transform(&rects, 0, 3, 0).is_none());
    }

    #[test]
    fn grid_outside_the_span_is_untransformed() {
        let rects = [
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(60.0, 0.0, 110.0, 50.0),
            Rect::new(0.0, 60.0, 50.0, 110.0),
        ];
        // Dragging 0 over 1 leaves index 2 in place.
        assert!(RectGrid.transform(&rects, 0, 1, 2).is_none());
    }
}
