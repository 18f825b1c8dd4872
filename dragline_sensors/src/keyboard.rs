// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard sensor: discrete, key-driven drag movement.
//!
//! Keyboard drags have no activation constraint — pressing a start key
//! (Space or Enter by default) while a draggable holds focus activates on
//! the spot. Movement is discrete: each arrow press asks a
//! [`CoordinateGetter`] for the next position given the current one plus
//! the droppable geometry, and the sensor emits a single
//! [`SensorEvent::Moved`] with the total offset from the activation origin.
//!
//! The getter is the seam for navigation policy. [`FixedStep`] moves a
//! constant distance per press (free-form 2D movement); [`NextDroppable`]
//! jumps to the nearest droppable in the pressed direction, which is what
//! list-aware keyboard sorting wants.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use smallvec::smallvec;

use crate::{SensorEvent, SensorEvents};

/// The subset of keys the keyboard sensor reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
}

impl Key {
    /// Unit direction for arrow keys, `None` otherwise.
    #[must_use]
    pub const fn arrow_vector(self) -> Option<Vec2> {
        match self {
            Self::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Self::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            Self::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Self::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            _ => None,
        }
    }
}

/// Which keys start, end, and cancel a keyboard drag.
#[derive(Clone, Debug)]
pub struct KeyboardCodes {
    /// Keys that activate a drag on a focused draggable.
    pub start: Vec<Key>,
    /// Keys that drop (commit) an active drag.
    pub end: Vec<Key>,
    /// Keys that cancel an active drag.
    pub cancel: Vec<Key>,
}

impl Default for KeyboardCodes {
    fn default() -> Self {
        Self {
            start: [Key::Space, Key::Enter].into(),
            end: [Key::Space, Key::Enter].into(),
            cancel: [Key::Escape].into(),
        }
    }
}

/// Context handed to a [`CoordinateGetter`] for one key press.
#[derive(Copy, Clone, Debug)]
pub struct KeyboardContext<'a> {
    /// The drag's current position (origin plus movement so far).
    pub current: Point,
    /// The active draggable's rect at drag start, if measured.
    pub active_rect: Option<Rect>,
    /// Rect snapshot of the enabled droppables, in registration order.
    pub droppable_rects: &'a [Rect],
}

/// Maps a key press plus context to the next discrete drag position.
///
/// Returning `None` means the press does not move the drag (no candidate in
/// that direction, or a non-movement key).
pub trait CoordinateGetter {
    /// The next position, or `None` to stay put.
    fn next_coordinates(&self, key: Key, ctx: &KeyboardContext<'_>) -> Option<Point>;
}

/// Free-form movement: arrows shift the position by a fixed step.
#[derive(Copy, Clone, Debug)]
pub struct FixedStep {
    /// Distance per arrow press in logical pixels.
    pub step: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self { step: 25.0 }
    }
}

impl CoordinateGetter for FixedStep {
    fn next_coordinates(&self, key: Key, ctx: &KeyboardContext<'_>) -> Option<Point> {
        let dir = key.arrow_vector()?;
        Some(ctx.current + dir * self.step)
    }
}

/// List-aware movement: each arrow press jumps to the origin of the nearest
/// droppable whose center lies in the pressed direction.
///
/// Presses with no candidate in that direction do nothing, so the drag can
/// never be steered off the droppable grid.
#[derive(Copy, Clone, Debug, Default)]
pub struct NextDroppable;

impl CoordinateGetter for NextDroppable {
    fn next_coordinates(&self, key: Key, ctx: &KeyboardContext<'_>) -> Option<Point> {
        let dir = key.arrow_vector()?;
        let mut best: Option<(f64, Point)> = None;
        for rect in ctx.droppable_rects {
            let to = rect.center() - ctx.current;
            // Strictly in the pressed direction.
            if to.x * dir.x + to.y * dir.y <= 0.0 {
                continue;
            }
            let dist_sq = to.x * to.x + to.y * to.y;
            if best.is_none_or(|(b, _)| dist_sq < b) {
                best = Some((dist_sq, Point::new(rect.x0, rect.y0)));
            }
        }
        best.map(|(_, p)| p)
    }
}

/// State machine for keyboard drag activation and movement.
#[derive(Clone, Debug)]
pub struct KeyboardSensor {
    codes: KeyboardCodes,
    state: State,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    Active { origin: Point, current: Point },
}

impl KeyboardSensor {
    /// Creates a sensor with the given key bindings.
    #[must_use]
    pub const fn new(codes: KeyboardCodes) -> Self {
        Self {
            codes,
            state: State::Idle,
        }
    }

    /// Returns `true` if `key` is one of this sensor's start keys.
    #[must_use]
    pub fn can_activate(&self, key: Key) -> bool {
        self.codes.start.contains(&key)
    }

    /// Returns `true` while a keyboard drag is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Start key pressed while a draggable holds focus; `origin` is the
    /// focused element's reference point (typically its rect's top-left).
    pub fn begin(&mut self, origin: Point) -> SensorEvents {
        if self.is_active() {
            return SensorEvents::new();
        }
        self.state = State::Active {
            origin,
            current: origin,
        };
        smallvec![SensorEvent::Activated { origin }]
    }

    /// A key press while the drag is live.
    ///
    /// End keys drop, cancel keys cancel, and movement keys consult the
    /// getter; anything else is ignored.
    pub fn key_input(
        &mut self,
        key: Key,
        getter: &impl CoordinateGetter,
        active_rect: Option<Rect>,
        droppable_rects: &[Rect],
    ) -> SensorEvents {
        let State::Active { origin, current } = self.state else {
            return SensorEvents::new();
        };
        if self.codes.cancel.contains(&key) {
            self.state = State::Idle;
            return smallvec![SensorEvent::Cancelled];
        }
        if self.codes.end.contains(&key) {
            self.state = State::Idle;
            return smallvec![SensorEvent::Ended];
        }
        let ctx = KeyboardContext {
            current,
            active_rect,
            droppable_rects,
        };
        let Some(next) = getter.next_coordinates(key, &ctx) else {
            return SensorEvents::new();
        };
        self.state = State::Active {
            origin,
            current: next,
        };
        smallvec![SensorEvent::Moved {
            delta: next - origin,
            position: next,
        }]
    }

    /// Window lost focus. Cancels an active drag.
    pub fn window_blur(&mut self) -> SensorEvents {
        if !self.is_active() {
            return SensorEvents::new();
        }
        self.state = State::Idle;
        smallvec![SensorEvent::Cancelled]
    }
}

impl Default for KeyboardSensor {
    fn default() -> Self {
        Self::new(KeyboardCodes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_sensor() -> KeyboardSensor {
        let mut s = KeyboardSensor::default();
        s.begin(Point::new(100.0, 100.0));
        s
    }

    #[test]
    fn space_and_enter_start_by_default() {
        let s = KeyboardSensor::default();
        assert!(s.can_activate(Key::Space));
        assert!(s.can_activate(Key::Enter));
        assert!(!s.can_activate(Key::ArrowDown));
    }

    #[test]
    fn begin_activates_at_origin() {
        let mut s = KeyboardSensor::default();
        let events = s.begin(Point::new(4.0, 8.0));
        assert_eq!(
            events.as_slice(),
            &[SensorEvent::Activated {
                origin: Point::new(4.0, 8.0)
            }]
        );
        assert!(s.is_active());
    }

    #[test]
    fn fixed_step_moves_in_discrete_increments() {
        let mut s = active_sensor();
        let getter = FixedStep { step: 25.0 };

        let events = s.key_input(Key::ArrowDown, &getter, None, &[]);
        assert_eq!(
            events.as_slice(),
            &[SensorEvent::Moved {
                delta: Vec2::new(0.0, 25.0),
                position: Point::new(100.0, 125.0),
            }]
        );

        // Deltas accumulate against the origin, not the last position.
        let events = s.key_input(Key::ArrowRight, &getter, None, &[]);
        assert_eq!(
            events.as_slice(),
            &[SensorEvent::Moved {
                delta: Vec2::new(25.0, 25.0),
                position: Point::new(125.0, 125.0),
            }]
        );
    }

    #[test]
    fn end_key_drops_and_cancel_key_cancels() {
        let mut s = active_sensor();
        let getter = FixedStep::default();
        assert_eq!(
            s.key_input(Key::Space, &getter, None, &[]).as_slice(),
            &[SensorEvent::Ended]
        );

        let mut s = active_sensor();
        assert_eq!(
            s.key_input(Key::Escape, &getter, None, &[]).as_slice(),
            &[SensorEvent::Cancelled]
        );
        assert!(!s.is_active());
    }

    #[test]
    fn next_droppable_jumps_to_nearest_in_direction() {
        let mut s = active_sensor();
        let rects = [
            Rect::new(0.0, 200.0, 50.0, 250.0),   // below, farther
            Rect::new(90.0, 140.0, 140.0, 190.0), // below, nearest
            Rect::new(0.0, 0.0, 50.0, 50.0),      // above
        ];
        let events = s.key_input(Key::ArrowDown, &NextDroppable, None, &rects);
        assert_eq!(
            events.as_slice(),
            &[SensorEvent::Moved {
                delta: Vec2::new(-10.0, 40.0),
                position: Point::new(90.0, 140.0),
            }]
        );
    }

    #[test]
    fn next_droppable_stays_put_with_no_candidate() {
        let mut s = active_sensor();
        let rects = [Rect::new(0.0, 0.0, 50.0, 50.0)]; // only above
        assert!(
            s.key_input(Key::ArrowDown, &NextDroppable, None, &rects)
                .is_empty()
        );
    }

    #[test]
    fn blur_cancels() {
        let mut s = active_sensor();
        assert_eq!(s.window_blur().as_slice(), &[SensorEvent::Cancelled]);
        assert!(s.window_blur().is_empty());
    }

    #[test]
    fn keys_while_idle_are_ignored() {
        let mut s = KeyboardSensor::default();
        assert!(
            s.key_input(Key::ArrowDown, &FixedStep::default(), None, &[])
                .is_empty()
        );
    }
}
