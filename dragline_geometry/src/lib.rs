// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_geometry --heading-base-level=0

//! Dragline Geometry: shared geometry primitives for the drag-and-drop engine.
//!
//! This crate is the leaf of the Dragline workspace. It builds on [`kurbo`]
//! for rectangles, points, and vectors, and adds the handful of concepts the
//! rest of the engine shares:
//!
//! - [`Transform`]: a pure 2D rendering instruction (translate + scale) that
//!   higher layers hand to the UI. It is never authoritative state; every
//!   consumer recomputes it from inputs each tick.
//! - [`rect::corners`]: the corner points of a rect in a fixed order, used by
//!   corner-based collision scoring and keyboard navigation.
//! - [`scroll::ScrollAccumulator`]: per-ancestor scroll deltas accumulated
//!   since drag start, so a dragged element stays under the pointer while
//!   the page auto-scrolls underneath it.
//! - [`scroll::scroll_intent`]: tells the caller which way (and how
//!   urgently) to scroll a container whose edge the pointer approaches. The
//!   engine itself never scrolls anything.
//!
//! All coordinates live in a single caller-chosen frame (typically
//! viewport-relative logical pixels). Derived rect values such as centers and
//! corners are always computed on demand, never stored, so they cannot go
//! stale.
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_geometry::Transform;
//! use kurbo::Vec2;
//!
//! // A drag that has moved 12px right and 4px down.
//! let transform = Transform::translation(Vec2::new(12.0, 4.0));
//! assert!(!transform.is_identity());
//! assert_eq!(transform.vector(), Vec2::new(12.0, 4.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod rect;
pub mod scroll;

mod transform;

pub use transform::Transform;
