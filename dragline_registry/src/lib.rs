// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_registry --heading-base-level=0

//! Dragline Registry: live bookkeeping of draggable and droppable nodes.
//!
//! The registries are the arena behind a drag surface: one
//! [`draggable::DraggableRegistry`] plus one
//! [`droppable::DroppableRegistry`], both owned by the session coordinator
//! and keyed by caller-chosen identifiers. Consumers register on mount and
//! unregister on unmount; the engine never dereferences platform nodes
//! itself — it stores opaque handles and asks a caller-supplied
//! [`MeasureNode`] for rectangles when it needs them.
//!
//! Design points, each of which exists because of a real failure mode:
//!
//! - **Owner-token eviction**: draggable registration returns an
//!   [`OwnerKey`]; unregistration only evicts when the token matches.
//!   Without this, a list item that unmounts and remounts under the same id
//!   (virtualized lists do this constantly) would let the *old* instance's
//!   teardown evict the *new* instance's entry.
//! - **Last-writer-wins duplicates**: duplicate registration replaces the
//!   entry and reports the anomaly to a [`trace::RegistryTrace`] hook
//!   instead of panicking; suites attach a recorder to detect it.
//! - **Lazy cached measurement**: droppable rects are measured on first
//!   need and cached until invalidated (resize, ancestor scroll, explicit
//!   request), never on every frame. The cadence is tunable via
//!   [`droppable::MeasuringStrategy`].
//! - **Copy-on-read snapshots**: rect collection returns an owned `Vec` in
//!   registration order, so registration churn mid-tick can never corrupt
//!   an in-flight collision pass.
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_registry::MeasureNode;
//! use dragline_registry::droppable::DroppableRegistry;
//! use kurbo::Rect;
//!
//! // A toy measurer: handles *are* rects.
//! struct Identity;
//! impl MeasureNode<Rect> for Identity {
//!     fn measure(&mut self, handle: &Rect) -> Option<Rect> {
//!         Some(*handle)
//!     }
//! }
//!
//! let mut droppables = DroppableRegistry::<&str, Rect, ()>::default();
//! droppables.register("a", Rect::new(0.0, 0.0, 50.0, 50.0), ());
//! droppables.register("b", Rect::new(0.0, 60.0, 50.0, 110.0), ());
//!
//! let rects = droppables.collect_rects(&mut Identity, false);
//! assert_eq!(rects.len(), 2);
//! assert_eq!(rects[0].0, "a"); // registration order
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod draggable;
pub mod droppable;
pub mod trace;

use kurbo::Rect;

/// Measures an opaque node handle into a viewport-relative rect.
///
/// Implemented by the host layer (DOM bindings, a retained scene graph, a
/// test fixture). Returning `None` means the node is currently unmounted or
/// otherwise unmeasurable; callers skip such candidates rather than failing
/// the whole pass.
pub trait MeasureNode<H> {
    /// The node's current bounding rect, if it can be measured.
    fn measure(&mut self, handle: &H) -> Option<Rect>;
}

/// Token identifying one registration of a draggable id.
///
/// Monotonically allocated and never reused within a registry, so a stale
/// owner can always be told apart from the current one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OwnerKey(u64);

impl OwnerKey {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}
