// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_session --heading-base-level=0

//! Dragline Session: the state machine owning an active drag.
//!
//! [`DragCoordinator`] ties the engine together: it owns the draggable and
//! droppable registries, the sensor arbiter, the accumulated scroll delta,
//! and one collision strategy. Hosts feed raw input in; ordered
//! [`DragEvent`]s come out of every call, and snapshot accessors expose the
//! state in between. This snapshot-plus-events contract is the entire
//! subscription surface: any binding layer — retained- or immediate-mode —
//! adapts it without ambient context.
//!
//! The lifecycle:
//!
//! ```text
//! Idle -> Initializing -> Dragging -> PendingDrop -> Idle
//!             |               |                        ^
//!             +---------------+------------------------+
//!          (early release / cancel / forced abort)
//! ```
//!
//! - **Initializing**: a sensor claimed an input but its activation
//!   constraint (distance or delay) is pending. No lifecycle events fire.
//! - **Dragging**: each tick emits `Started`/`Moved` and, only when the
//!   resolved droppable actually changed, `OverChanged`. Collision
//!   detection runs per tick against the registry's current rect snapshot.
//! - **PendingDrop**: with drop confirmation enabled, release parks here
//!   until [`DragCoordinator::resolve_drop`]. Movement and measurement are
//!   suppressed meanwhile, but Escape and window blur still force-cancel,
//!   discarding the late resolution.
//! - Exactly one session exists at a time; starting another is an error
//!   with no state change. The active node unregistering mid-drag always
//!   degrades to a cancel, never to silence.
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_collision::strategies::RectIntersection;
//! use dragline_registry::MeasureNode;
//! use dragline_sensors::{ActivationInput, Sensors};
//! use dragline_session::{DragCoordinator, DragEvent};
//! use kurbo::{Point, Rect};
//!
//! // A toy measurer: node handles *are* rects.
//! struct Identity;
//! impl MeasureNode<Rect> for Identity {
//!     fn measure(&mut self, handle: &Rect) -> Option<Rect> {
//!         Some(*handle)
//!     }
//! }
//!
//! let mut engine = DragCoordinator::new(Sensors::default(), RectIntersection);
//! engine.register_draggable("card", Rect::new(0.0, 0.0, 50.0, 50.0), ());
//! engine.register_droppable("slot", Rect::new(100.0, 0.0, 150.0, 50.0), ());
//!
//! let press = ActivationInput::PointerDown {
//!     position: Point::new(25.0, 25.0),
//!     primary_button: true,
//!     over_draggable: true,
//!     now_ms: 0,
//! };
//! let events = engine.start("card", &press, &mut Identity).unwrap();
//! assert_eq!(events[0], DragEvent::Started { active: "card" });
//!
//! // Drag the card over the slot.
//! let events = engine.pointer_move(Point::new(130.0, 25.0), 16, &mut Identity);
//! assert!(events.contains(&DragEvent::OverChanged {
//!     active: "card",
//!     over: Some("slot"),
//! }));
//!
//! // Drop commits.
//! let events = engine.release();
//! assert_eq!(
//!     events[0],
//!     DragEvent::Ended {
//!         active: "card",
//!         over: Some("slot"),
//!     }
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coordinator;
mod error;
mod events;

pub use coordinator::{CoordinatorOptions, DragCoordinator, SessionPhase};
pub use error::{ResolveError, StartError};
pub use events::{DragEvent, SessionEvents};
