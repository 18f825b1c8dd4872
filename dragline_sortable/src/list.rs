// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One container's sortable engine instance.

use alloc::vec::Vec;

use kurbo::Rect;

use dragline_geometry::Transform;

use crate::order::array_move;
use crate::strategy::SortingStrategy;

/// The slice of drag-session state a sortable container consumes.
///
/// Plain values, injected explicitly each tick — the engine has no ambient
/// session context. `over_container` is the container that owns the
/// droppable the drag is currently over, as resolved by the caller (which
/// knows container membership); it is how cross-container moves are
/// detected.
#[derive(Clone, Debug, Default)]
pub struct SortContext<Id> {
    /// The id being dragged, if a session is live.
    pub active_id: Option<Id>,
    /// The droppable currently under the drag.
    pub over_id: Option<Id>,
    /// The container owning `over_id`.
    pub over_container: Option<Id>,
}

/// The sortable engine for one ordered container.
///
/// The caller owns the authoritative item sequence and pushes it in via
/// [`SortableList::set_items`] whenever it changes; everything else —
/// the placeholder-adjusted view, indices, transforms, projected order —
/// is derived per call from that sequence plus a [`SortContext`]. Nothing
/// here is incrementally mutated during a drag, so recomputing with
/// identical inputs always yields identical results.
#[derive(Clone, Debug)]
pub struct SortableList<Id, S> {
    container_id: Id,
    strategy: S,
    items: Vec<Id>,
    previous_items: Vec<Id>,
}

impl<Id, S> SortableList<Id, S>
where
    Id: Clone + PartialEq,
    S: SortingStrategy,
{
    /// Creates an empty engine for `container_id`.
    #[must_use]
    pub const fn new(container_id: Id, strategy: S) -> Self {
        Self {
            container_id,
            strategy,
            items: Vec::new(),
            previous_items: Vec::new(),
        }
    }

    /// This container's id.
    #[must_use]
    pub fn container_id(&self) -> &Id {
        &self.container_id
    }

    /// The caller's current item sequence.
    #[must_use]
    pub fn items(&self) -> &[Id] {
        &self.items
    }

    /// Replaces the authoritative item sequence for this cycle.
    pub fn set_items(&mut self, items: Vec<Id>) {
        self.items = items;
    }

    /// Returns `true` while the sequence differs from the one the last
    /// completed cycle rendered. While this holds, [`SortableList::transforms`]
    /// suppresses every transform: animating from rect snapshots measured
    /// under the old sequence would lurch. Callers should also re-measure
    /// the affected droppables now.
    #[must_use]
    pub fn items_changed(&self) -> bool {
        self.items != self.previous_items
    }

    /// Marks the current sequence as rendered and measured, re-enabling
    /// transforms for the next cycle.
    pub fn end_cycle(&mut self) {
        self.previous_items = self.items.clone();
    }

    /// The items this container considers present this tick.
    ///
    /// A pure function of the caller items and the drag snapshot:
    ///
    /// - If the active item belongs here but the drag is over a *different*
    ///   container, it is transiently absent (the target renders it).
    /// - If a foreign active item is over *this* container, it is appended
    ///   as a transient placeholder slot.
    ///
    /// Recomputed from scratch on every call, so the active id appears in
    /// exactly one container's view at any instant, by construction.
    #[must_use]
    pub fn items_view(&self, ctx: &SortContext<Id>) -> Vec<Id> {
        let mut view = self.items.clone();
        let Some(active) = &ctx.active_id else {
            return view;
        };
        let is_home = view.contains(active);
        let is_over_here = ctx.over_container.as_ref() == Some(&self.container_id);
        if is_home && !is_over_here && ctx.over_container.is_some() {
            view.retain(|id| id != active);
        } else if !is_home && is_over_here {
            view.push(active.clone());
        }
        view
    }

    /// Index of the active item in this tick's view, if present.
    #[must_use]
    pub fn active_index(&self, ctx: &SortContext<Id>) -> Option<usize> {
        let view = self.items_view(ctx);
        ctx.active_id
            .as_ref()
            .and_then(|active| view.iter().position(|id| id == active))
    }

    /// Index of the over target in this tick's view, if present.
    #[must_use]
    pub fn over_index(&self, ctx: &SortContext<Id>) -> Option<usize> {
        let view = self.items_view(ctx);
        ctx.over_id
            .as_ref()
            .and_then(|over| view.iter().position(|id| id == over))
    }

    /// The order this list would have if the drag dropped now, or `None`
    /// when the drag does not resolve inside this container.
    ///
    /// Reported for the caller to commit — the engine never mutates the
    /// authoritative sequence.
    #[must_use]
    pub fn projected_order(&self, ctx: &SortContext<Id>) -> Option<Vec<Id>> {
        let view = self.items_view(ctx);
        let active = view
            .iter()
            .position(|id| Some(id) == ctx.active_id.as_ref())?;
        let over = view.iter().position(|id| Some(id) == ctx.over_id.as_ref())?;
        Some(array_move(&view, active, over))
    }

    /// The render transform per view item, aligned with
    /// [`SortableList::items_view`].
    ///
    /// `rects` is the ordered rect snapshot for the view (see
    /// [`sorted_rects`]); a trailing placeholder without a measured rect
    /// simply gets no transform. All transforms are suppressed while
    /// [`SortableList::items_changed`] holds.
    #[must_use]
    pub fn transforms(
        &self,
        ctx: &SortContext<Id>,
        rects: &[Rect],
    ) -> Vec<(Id, Option<Transform>)> {
        let view = self.items_view(ctx);
        if self.items_changed() {
            return view.into_iter().map(|id| (id, None)).collect();
        }
        let active = view
            .iter()
            .position(|id| Some(id) == ctx.active_id.as_ref());
        let over = view.iter().position(|id| Some(id) == ctx.over_id.as_ref());
        let (Some(active), Some(over)) = (active, over) else {
            return view.into_iter().map(|id| (id, None)).collect();
        };
        view.into_iter()
            .enumerate()
            .map(|(index, id)| {
                let transform = self.strategy.transform(rects, active, over, index);
                (id, transform)
            })
            .collect()
    }
}

/// Reorders a measured `(id, rect)` snapshot into `view` order.
///
/// Items without a measurement are skipped; in practice only a trailing
/// cross-container placeholder lacks one, so indices stay aligned with the
/// view.
#[must_use]
pub fn sorted_rects<Id: PartialEq>(view: &[Id], measured: &[(Id, Rect)]) -> Vec<Rect> {
    view.iter()
        .filter_map(|id| {
            measured
                .iter()
                .find(|(other, _)| other == id)
                .map(|(_, rect)| *rect)
        })
        .collect()
}
