// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_sortable --heading-base-level=0

//! Dragline Sortable: projected reorderings for ordered lists under drag.
//!
//! Given the coordinator's `{active id, over id}` and a container's ordered
//! item list, this crate computes (a) the projected new order and (b) a
//! render [`Transform`](dragline_geometry::Transform) per item, so the UI
//! can animate the list toward that order without actually mutating it
//! mid-drag. The engine never reorders caller data — on drop, the caller
//! applies [`order::array_move`] to its authoritative list itself.
//!
//! The pieces:
//!
//! - [`strategy::SortingStrategy`]: maps `(rects, active index, over index,
//!   item index)` to an optional transform. Built-ins:
//!   [`strategy::VerticalList`], [`strategy::HorizontalList`] (one-slot
//!   shifts along one axis), and [`strategy::RectGrid`] (measured rect
//!   diffs, handling wrapping grids).
//! - [`list::SortableList`]: one container's engine instance. Its
//!   [`items_view`](list::SortableList::items_view) is a *pure function* of
//!   the caller items plus the drag snapshot — the cross-container
//!   placeholder is recomputed from scratch every tick, never incrementally
//!   mutated, which keeps the "an id lives in exactly one container's view"
//!   invariant trivial to check.
//! - [`order::array_move`] / [`order::array_swap`]: the commit helpers.
//!
//! Deliberate quirk: when the caller's item sequence itself changes between
//! cycles, transforms are suppressed for that cycle (everything reports
//! `None`) — animating from rect snapshots taken under the *old* sequence
//! would lurch. Call [`list::SortableList::end_cycle`] once the new rects
//! are measured to resume.
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_sortable::list::{SortContext, SortableList};
//! use dragline_sortable::order::array_move;
//! use dragline_sortable::strategy::VerticalList;
//! use kurbo::Rect;
//!
//! let mut list = SortableList::new("todo", VerticalList);
//! list.set_items(vec!["a", "b", "c", "d"]);
//! list.end_cycle();
//!
//! // Dragging "a" over "c".
//! let ctx = SortContext {
//!     active_id: Some("a"),
//!     over_id: Some("c"),
//!     over_container: Some("todo"),
//! };
//! let rects: Vec<Rect> = (0..4)
//!     .map(|i| Rect::new(0.0, i as f64 * 40.0, 100.0, i as f64 * 40.0 + 40.0))
//!     .collect();
//!
//! let transforms = list.transforms(&ctx, &rects);
//! // "b" and "c" shift up one slot; "d" is untouched.
//! assert_eq!(transforms[1].1.unwrap().y, -40.0);
//! assert_eq!(transforms[2].1.unwrap().y, -40.0);
//! assert!(transforms[3].1.is_none());
//!
//! // On drop the caller commits the projected order itself.
//! assert_eq!(list.projected_order(&ctx).unwrap(), ["b", "c", "a", "d"]);
//! assert_eq!(array_move(&["a", "b", "c", "d"], 0, 2), ["b", "c", "a", "d"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod list;
pub mod order;
pub mod strategy;
