// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle events emitted by the coordinator.

use kurbo::Vec2;
use smallvec::SmallVec;

/// Events produced by one coordinator call.
///
/// A single tick emits at most a handful (activation produces `Started`,
/// an over change, and a replayed move), hence the inline capacity.
pub type SessionEvents<Id> = SmallVec<[DragEvent<Id>; 4]>;

/// One lifecycle notification.
///
/// Within a tick the order is fixed: `Started`, then `Moved`, then
/// `OverChanged`. `Moved` fires on every movement tick; `OverChanged` only
/// when the resolved droppable id actually changed.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent<Id> {
    /// A drag session became live (activation constraint satisfied).
    Started {
        /// The dragged draggable.
        active: Id,
    },
    /// The drag moved.
    Moved {
        /// The dragged draggable.
        active: Id,
        /// Total translation since activation, scroll included.
        delta: Vec2,
    },
    /// The resolved droppable changed (possibly to none).
    OverChanged {
        /// The dragged draggable.
        active: Id,
        /// The newly resolved droppable.
        over: Option<Id>,
    },
    /// The drag was released and awaits the caller's drop decision.
    DropPending {
        /// The dragged draggable.
        active: Id,
        /// The droppable it was released over.
        over: Option<Id>,
    },
    /// The drag committed.
    Ended {
        /// The dragged draggable.
        active: Id,
        /// The droppable it was dropped on.
        over: Option<Id>,
    },
    /// The drag was cancelled; callers revert any provisional UI.
    Cancelled {
        /// The dragged draggable.
        active: Id,
    },
}
