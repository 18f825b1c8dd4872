// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch sensor: pointer machinery plus a race against native scrolling.
//!
//! On touch devices a vertical swipe is ambiguous until one contender wins:
//! either the finger travels far enough for the drag to claim the gesture,
//! or the platform recognizes a scroll first. The host reports the latter
//! via [`TouchSensor::native_scroll`]; whichever side exceeds its threshold
//! first wins, and the loser is suppressed for the rest of that touch
//! sequence.
//!
//! Once the drag has won, [`TouchSensor::claimed`] turns `true` and the host
//! is expected to suppress further native scrolling for the sequence
//! (`preventDefault` or the platform equivalent).

use kurbo::Point;

use crate::pointer::PointerSensor;
use crate::{ActivationConstraint, SensorEvents};

/// State machine for touch drag activation.
#[derive(Clone, Debug)]
pub struct TouchSensor {
    inner: PointerSensor,
    race_lost: bool,
}

impl TouchSensor {
    /// Creates a sensor with the given activation constraint.
    ///
    /// [`TouchSensor::default`] uses a 250ms press-and-hold with 5px
    /// tolerance, which keeps short swipes scrolling.
    #[must_use]
    pub const fn new(constraint: ActivationConstraint) -> Self {
        Self {
            inner: PointerSensor::new(constraint),
            race_lost: false,
        }
    }

    /// Returns `true` once the drag has claimed the touch sequence; the
    /// host should suppress native scrolling while this holds.
    #[must_use]
    pub fn claimed(&self) -> bool {
        self.inner.is_active()
    }

    /// Returns `true` while a touch is held, unclaimed, and still in the
    /// running for activation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.race_lost && self.inner.is_pending()
    }

    /// First touch of a sequence at `origin`. Resets the scroll race.
    pub fn begin(&mut self, origin: Point, now_ms: u64) -> SensorEvents {
        self.race_lost = false;
        self.inner.begin(origin, now_ms)
    }

    /// Touch point moved. No-op for the remainder of the sequence if the
    /// scroll already won.
    pub fn motion(&mut self, position: Point, now_ms: u64) -> SensorEvents {
        if self.race_lost {
            return SensorEvents::new();
        }
        self.inner.motion(position, now_ms)
    }

    /// Clock tick, for delay-based constraints.
    pub fn poll(&mut self, now_ms: u64) -> SensorEvents {
        if self.race_lost {
            return SensorEvents::new();
        }
        self.inner.poll(now_ms)
    }

    /// The platform recognized a scroll gesture for this touch sequence.
    ///
    /// If the drag had not yet activated, it loses the race: the pending
    /// activation is dropped and nothing from this sequence can activate.
    /// If the drag already claimed the sequence, the report is ignored —
    /// the host should have suppressed the scroll.
    pub fn native_scroll(&mut self) {
        if !self.inner.is_active() {
            self.race_lost = true;
            // Drop any pending activation without emitting.
            let _ = self.inner.release();
        }
    }

    /// Touch lifted. Ends an active drag.
    pub fn release(&mut self) -> SensorEvents {
        self.race_lost = false;
        self.inner.release()
    }

    /// Escape pressed (external keyboard). Cancels an active drag.
    pub fn escape(&mut self) -> SensorEvents {
        self.inner.escape()
    }

    /// Window lost focus or the page was hidden. Cancels an active drag.
    pub fn window_blur(&mut self) -> SensorEvents {
        self.inner.window_blur()
    }
}

impl Default for TouchSensor {
    fn default() -> Self {
        Self::new(ActivationConstraint::Delay {
            ms: 250,
            tolerance_px: 5.0,
        })
    }
}
