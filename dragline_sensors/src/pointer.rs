// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer (mouse/pen) sensor.
//!
//! The pointer sensor tracks a single press through three phases:
//!
//! 1. **Idle**: nothing held.
//! 2. **Pending**: pressed, activation constraint not yet satisfied.
//!    Movement is buffered; releasing here leaves the press to be a click.
//! 3. **Active**: constraint satisfied; every motion call emits a
//!    [`SensorEvent::Moved`] with the total offset from the press origin.
//!
//! A drag and a click never both come out of the same press: once
//! `Activated` is emitted, release produces `Ended`, and a release while
//! still pending produces nothing at all.

use kurbo::Point;
use smallvec::smallvec;

use crate::{ActivationConstraint, SensorEvent, SensorEvents, exceeds_distance};

/// State machine for mouse/pen drag activation.
#[derive(Clone, Debug)]
pub struct PointerSensor {
    constraint: ActivationConstraint,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Pending {
        origin: Point,
        pressed_at_ms: u64,
        last: Point,
    },
    Active {
        origin: Point,
    },
}

impl PointerSensor {
    /// Creates a sensor with the given activation constraint.
    #[must_use]
    pub const fn new(constraint: ActivationConstraint) -> Self {
        Self {
            constraint,
            state: State::Idle,
        }
    }

    /// Returns `true` once the constraint is satisfied and the press is a
    /// live drag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Returns `true` while a press is held but not yet activated.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Primary-button press at `origin`.
    ///
    /// Ignored unless idle. Under [`ActivationConstraint::Immediate`] the
    /// press activates on the spot.
    pub fn begin(&mut self, origin: Point, now_ms: u64) -> SensorEvents {
        if !matches!(self.state, State::Idle) {
            return SensorEvents::new();
        }
        match self.constraint {
            ActivationConstraint::Immediate => {
                self.state = State::Active { origin };
                smallvec![SensorEvent::Activated { origin }]
            }
            ActivationConstraint::Distance { .. } | ActivationConstraint::Delay { .. } => {
                self.state = State::Pending {
                    origin,
                    pressed_at_ms: now_ms,
                    last: origin,
                };
                SensorEvents::new()
            }
        }
    }

    /// Pointer movement to `position`.
    ///
    /// While pending under a distance constraint, crossing the threshold
    /// activates and the triggering position is replayed as the first move.
    /// While pending under a delay constraint, straying beyond the tolerance
    /// aborts the pending activation (the press falls back to a click).
    pub fn motion(&mut self, position: Point, _now_ms: u64) -> SensorEvents {
        match self.state {
            State::Idle => SensorEvents::new(),
            State::Pending { origin, .. } => match self.constraint {
                ActivationConstraint::Distance { px } if exceeds_distance(origin, position, px) => {
                    self.state = State::Active { origin };
                    smallvec![
                        SensorEvent::Activated { origin },
                        SensorEvent::Moved {
                            delta: position - origin,
                            position,
                        },
                    ]
                }
                ActivationConstraint::Delay { tolerance_px, .. }
                    if exceeds_distance(origin, position, tolerance_px) =>
                {
                    self.state = State::Idle;
                    SensorEvents::new()
                }
                _ => {
                    if let State::Pending { last, .. } = &mut self.state {
                        *last = position;
                    }
                    SensorEvents::new()
                }
            },
            State::Active { origin } => smallvec![SensorEvent::Moved {
                delta: position - origin,
                position,
            }],
        }
    }

    /// Clock tick. Fires a pending delay constraint once its hold duration
    /// has elapsed, replaying any buffered movement.
    pub fn poll(&mut self, now_ms: u64) -> SensorEvents {
        let State::Pending {
            origin,
            pressed_at_ms,
            last,
        } = self.state
        else {
            return SensorEvents::new();
        };
        let ActivationConstraint::Delay { ms, .. } = self.constraint else {
            return SensorEvents::new();
        };
        if now_ms.saturating_sub(pressed_at_ms) < ms {
            return SensorEvents::new();
        }
        self.state = State::Active { origin };
        let mut events: SensorEvents = smallvec![SensorEvent::Activated { origin }];
        if last != origin {
            events.push(SensorEvent::Moved {
                delta: last - origin,
                position: last,
            });
        }
        events
    }

    /// Button release. Ends an active drag; silently resolves a pending
    /// press (it was a click, not a drag).
    pub fn release(&mut self) -> SensorEvents {
        let was_active = self.is_active();
        self.state = State::Idle;
        if was_active {
            smallvec![SensorEvent::Ended]
        } else {
            SensorEvents::new()
        }
    }

    /// Escape pressed. Cancels an active drag.
    pub fn escape(&mut self) -> SensorEvents {
        self.cancel()
    }

    /// Window lost focus or the page was hidden. Cancels an active drag.
    pub fn window_blur(&mut self) -> SensorEvents {
        self.cancel()
    }

    fn cancel(&mut self) -> SensorEvents {
        let was_active = self.is_active();
        self.state = State::Idle;
        if was_active {
            smallvec![SensorEvent::Cancelled]
        } else {
            SensorEvents::new()
        }
    }
}
