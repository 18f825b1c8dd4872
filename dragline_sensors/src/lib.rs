// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dragline_sensors --heading-base-level=0

//! Dragline Sensors: per-modality input state machines for drag activation.
//!
//! A sensor turns raw input for one modality into a uniform drag stream.
//! Each sensor is a small synchronous state machine: the host feeds it raw
//! input calls (`begin`, `motion`, `release`, …) and receives a short list
//! of [`SensorEvent`]s back per call:
//!
//! - [`SensorEvent::Activated`]: the input counts as a drag from here on.
//! - [`SensorEvent::Moved`]: a movement tick with the total delta since the
//!   activation origin.
//! - [`SensorEvent::Ended`] / [`SensorEvent::Cancelled`]: terminal.
//!
//! Three sensors are provided:
//!
//! - [`pointer::PointerSensor`]: mouse/pen presses, with an optional
//!   [`ActivationConstraint`] (minimum distance, or press-and-hold delay)
//!   that disambiguates drags from clicks. Movement before the constraint
//!   is satisfied is buffered, not dispatched.
//! - [`touch::TouchSensor`]: the same machinery, plus a race against native
//!   scrolling — whichever exceeds its threshold first claims the touch
//!   sequence and the loser is suppressed until the next touch.
//! - [`keyboard::KeyboardSensor`]: activates on Space/Enter while a
//!   draggable holds focus; movement is discrete, driven by arrow keys
//!   through a pluggable [`keyboard::CoordinateGetter`].
//!
//! The engine never samples a clock: hosts pass timestamps in milliseconds
//! and drive delay constraints with an explicit `poll(now)` call.
//!
//! [`Sensors`] is the arbiter: sensors are tried in caller-defined priority
//! order against each raw activation input, and the first one that claims
//! it wins. The session coordinator holds at most one [`ActiveSensor`] at a
//! time.
//!
//! ## Minimal example
//!
//! ```rust
//! use dragline_sensors::pointer::PointerSensor;
//! use dragline_sensors::{ActivationConstraint, SensorEvent};
//! use kurbo::Point;
//!
//! let mut sensor = PointerSensor::new(ActivationConstraint::Distance { px: 5.0 });
//!
//! // Press, then a 2px wiggle: still a click candidate, nothing emitted.
//! assert!(sensor.begin(Point::new(10.0, 10.0), 0).is_empty());
//! assert!(sensor.motion(Point::new(12.0, 10.0), 16).is_empty());
//!
//! // Crossing the 5px threshold activates and replays the position.
//! let events = sensor.motion(Point::new(20.0, 10.0), 32);
//! assert!(matches!(events[0], SensorEvent::Activated { .. }));
//! assert!(matches!(events[1], SensorEvent::Moved { .. }));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod keyboard;
pub mod pointer;
pub mod touch;

mod arbiter;

pub use arbiter::{ActivationInput, ActiveSensor, SensorConfig, Sensors};

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Events emitted by a sensor in response to one raw input call.
///
/// Most calls emit zero or one event; activation emits two (`Activated`
/// followed by the replayed `Moved`), hence the inline capacity.
pub type SensorEvents = SmallVec<[SensorEvent; 2]>;

/// A normalized drag-stream event, identical across input modalities.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SensorEvent {
    /// The activation constraint is satisfied; the interaction is a drag.
    Activated {
        /// Where the press (or focus-activation) happened.
        origin: Point,
    },
    /// A movement tick.
    Moved {
        /// Total offset from the activation origin.
        delta: Vec2,
        /// The current input position.
        position: Point,
    },
    /// The interaction ended normally (release / drop key).
    Ended,
    /// The interaction was cancelled (Escape, window blur, forced abort).
    Cancelled,
}

/// Threshold an input must exceed before a press counts as a drag.
///
/// `Immediate` treats every press as a drag activation — appropriate when a
/// dedicated drag handle makes clicks impossible. `Distance` requires the
/// pointer to travel before claiming the gesture; `Delay` requires it to
/// stay put for a press-and-hold interval, aborting if it strays beyond the
/// tolerance first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActivationConstraint {
    /// Activate on press.
    Immediate,
    /// Activate once the pointer has moved at least `px` from the press.
    Distance {
        /// Minimum travel distance in logical pixels.
        px: f64,
    },
    /// Activate once the press has been held for `ms` without straying.
    Delay {
        /// Hold duration in milliseconds.
        ms: u64,
        /// Movement allowance while holding; exceeding it aborts.
        tolerance_px: f64,
    },
}

/// Squared-distance comparison helper; avoids a square root on the hot path.
pub(crate) fn exceeds_distance(a: Point, b: Point, threshold_px: f64) -> bool {
    let d = b - a;
    d.x * d.x + d.y * d.y >= threshold_px * threshold_px
}
