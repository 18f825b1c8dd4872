// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sensor arbitration: priority-ordered activation over raw input.
//!
//! A drag surface usually installs several sensors at once (pointer +
//! keyboard, or touch + pointer + keyboard). For each raw activation input
//! the sensors are tried in the caller's priority order; the first one
//! whose activation test passes claims the input and the rest are skipped.
//! At most one [`ActiveSensor`] exists at a time — the session coordinator
//! owns it and rejects further activation attempts while it lives.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::keyboard::{CoordinateGetter, Key, KeyboardCodes, KeyboardSensor};
use crate::pointer::PointerSensor;
use crate::touch::TouchSensor;
use crate::{ActivationConstraint, SensorEvents};

/// Configuration for one sensor slot in priority order.
#[derive(Clone, Debug)]
pub enum SensorConfig {
    /// Mouse/pen presses.
    Pointer {
        /// Drag-vs-click disambiguation threshold.
        constraint: ActivationConstraint,
    },
    /// Touch sequences.
    Touch {
        /// Drag-vs-scroll disambiguation threshold.
        constraint: ActivationConstraint,
    },
    /// Focus + key activation.
    Keyboard {
        /// Start/end/cancel key bindings.
        codes: KeyboardCodes,
    },
}

/// A raw input that may start a drag, as reported by the host.
///
/// The host resolves hit testing and focus before calling the arbiter:
/// `over_draggable` / `focus_origin` say whether the input landed on a
/// registered draggable at all.
#[derive(Copy, Clone, Debug)]
pub enum ActivationInput {
    /// A pointer button went down.
    PointerDown {
        /// Press position.
        position: Point,
        /// `true` for the primary button only.
        primary_button: bool,
        /// `true` if the press hit a registered draggable.
        over_draggable: bool,
        /// Host clock, milliseconds.
        now_ms: u64,
    },
    /// A touch sequence started.
    TouchStart {
        /// First touch position.
        position: Point,
        /// `true` if the touch hit a registered draggable.
        over_draggable: bool,
        /// Host clock, milliseconds.
        now_ms: u64,
    },
    /// A key went down.
    KeyDown {
        /// The pressed key.
        key: Key,
        /// Reference point of the focused draggable, if any has focus.
        focus_origin: Option<Point>,
    },
}

/// An ordered set of sensor configurations.
#[derive(Clone, Debug)]
pub struct Sensors {
    configs: Vec<SensorConfig>,
}

impl Sensors {
    /// Creates an arbiter trying `configs` in order.
    #[must_use]
    pub const fn new(configs: Vec<SensorConfig>) -> Self {
        Self { configs }
    }

    /// Offers `input` to each sensor in priority order.
    ///
    /// The first sensor whose activation test passes claims the input and
    /// is returned as a live [`ActiveSensor`] along with whatever events
    /// its `begin` produced (empty while an activation constraint is still
    /// pending). `None` means no sensor wanted the input.
    #[must_use]
    pub fn try_activate(&self, input: &ActivationInput) -> Option<(ActiveSensor, SensorEvents)> {
        for config in &self.configs {
            match (config, input) {
                (
                    SensorConfig::Pointer { constraint },
                    ActivationInput::PointerDown {
                        position,
                        primary_button: true,
                        over_draggable: true,
                        now_ms,
                    },
                ) => {
                    let mut sensor = PointerSensor::new(*constraint);
                    let events = sensor.begin(*position, *now_ms);
                    return Some((ActiveSensor::Pointer(sensor), events));
                }
                (
                    SensorConfig::Touch { constraint },
                    ActivationInput::TouchStart {
                        position,
                        over_draggable: true,
                        now_ms,
                    },
                ) => {
                    let mut sensor = TouchSensor::new(*constraint);
                    let events = sensor.begin(*position, *now_ms);
                    return Some((ActiveSensor::Touch(sensor), events));
                }
                (
                    SensorConfig::Keyboard { codes },
                    ActivationInput::KeyDown {
                        key,
                        focus_origin: Some(origin),
                    },
                ) => {
                    let mut sensor = KeyboardSensor::new(codes.clone());
                    if !sensor.can_activate(*key) {
                        continue;
                    }
                    let events = sensor.begin(*origin);
                    return Some((ActiveSensor::Keyboard(sensor), events));
                }
                _ => {}
            }
        }
        None
    }
}

impl Default for Sensors {
    /// Pointer (immediate), touch (press-and-hold), keyboard — in that
    /// order.
    fn default() -> Self {
        Self::new(
            [
                SensorConfig::Pointer {
                    constraint: ActivationConstraint::Immediate,
                },
                SensorConfig::Touch {
                    constraint: ActivationConstraint::Delay {
                        ms: 250,
                        tolerance_px: 5.0,
                    },
                },
                SensorConfig::Keyboard {
                    codes: KeyboardCodes::default(),
                },
            ]
            .into(),
        )
    }
}

/// The sensor currently holding the drag session, if any.
///
/// Calls that do not apply to the live modality are no-ops returning no
/// events, so the coordinator can forward raw input uniformly.
#[derive(Clone, Debug)]
pub enum ActiveSensor {
    /// A live pointer interaction.
    Pointer(PointerSensor),
    /// A live touch interaction.
    Touch(TouchSensor),
    /// A live keyboard interaction.
    Keyboard(KeyboardSensor),
}

impl ActiveSensor {
    /// Continuous movement (pointer/touch only).
    pub fn motion(&mut self, position: Point, now_ms: u64) -> SensorEvents {
        match self {
            Self::Pointer(s) => s.motion(position, now_ms),
            Self::Touch(s) => s.motion(position, now_ms),
            Self::Keyboard(_) => SensorEvents::new(),
        }
    }

    /// Clock tick for delay constraints (pointer/touch only).
    pub fn poll(&mut self, now_ms: u64) -> SensorEvents {
        match self {
            Self::Pointer(s) => s.poll(now_ms),
            Self::Touch(s) => s.poll(now_ms),
            Self::Keyboard(_) => SensorEvents::new(),
        }
    }

    /// Pointer/touch release.
    pub fn release(&mut self) -> SensorEvents {
        match self {
            Self::Pointer(s) => s.release(),
            Self::Touch(s) => s.release(),
            Self::Keyboard(_) => SensorEvents::new(),
        }
    }

    /// Escape pressed.
    pub fn escape(&mut self) -> SensorEvents {
        match self {
            Self::Pointer(s) => s.escape(),
            Self::Touch(s) => s.escape(),
            Self::Keyboard(s) => s.window_blur(),
        }
    }

    /// Window blur / page hidden.
    pub fn window_blur(&mut self) -> SensorEvents {
        match self {
            Self::Pointer(s) => s.window_blur(),
            Self::Touch(s) => s.window_blur(),
            Self::Keyboard(s) => s.window_blur(),
        }
    }

    /// Native scroll recognized (touch only).
    pub fn native_scroll(&mut self) {
        if let Self::Touch(s) = self {
            s.native_scroll();
        }
    }

    /// Key press routed to a live keyboard drag (keyboard only).
    pub fn key_input(
        &mut self,
        key: Key,
        getter: &impl CoordinateGetter,
        active_rect: Option<Rect>,
        droppable_rects: &[Rect],
    ) -> SensorEvents {
        match self {
            Self::Keyboard(s) => s.key_input(key, getter, active_rect, droppable_rects),
            _ => SensorEvents::new(),
        }
    }

    /// Returns `true` once the activation constraint is satisfied.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Pointer(s) => s.is_active(),
            Self::Touch(s) => s.claimed(),
            Self::Keyboard(s) => s.is_active(),
        }
    }

    /// Returns `true` while an activation constraint is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        match self {
            Self::Pointer(s) => s.is_pending(),
            Self::Touch(s) => s.is_pending(),
            Self::Keyboard(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SensorEvent;

    fn pointer_down(over: bool) -> ActivationInput {
        ActivationInput::PointerDown {
            position: Point::new(5.0, 5.0),
            primary_button: true,
            over_draggable: over,
            now_ms: 0,
        }
    }

    #[test]
    fn first_matching_sensor_claims_the_input() {
        let sensors = Sensors::default();
        let (active, events) = sensors.try_activate(&pointer_down(true)).unwrap();
        assert!(matches!(active, ActiveSensor::Pointer(_)));
        assert!(matches!(events[0], SensorEvent::Activated { .. }));
    }

    #[test]
    fn inputs_off_a_draggable_are_refused() {
        let sensors = Sensors::default();
        assert!(sensors.try_activate(&pointer_down(false)).is_none());
    }

    #[test]
    fn secondary_button_is_refused() {
        let sensors = Sensors::default();
        let input = ActivationInput::PointerDown {
            position: Point::ZERO,
            primary_button: false,
            over_draggable: true,
            now_ms: 0,
        };
        assert!(sensors.try_activate(&input).is_none());
    }

    #[test]
    fn touch_claims_with_pending_constraint() {
        let sensors = Sensors::default();
        let input = ActivationInput::TouchStart {
            position: Point::ZERO,
            over_draggable: true,
            now_ms: 0,
        };
        let (active, events) = sensors.try_activate(&input).unwrap();
        // Claimed but still pending: press-and-hold has not elapsed.
        assert!(matches!(active, ActiveSensor::Touch(_)));
        assert!(events.is_empty());
        assert!(!active.is_active());
    }

    #[test]
    fn keyboard_requires_focus_and_a_start_key() {
        let sensors = Sensors::default();
        let no_focus = ActivationInput::KeyDown {
            key: Key::Space,
            focus_origin: None,
        };
        assert!(sensors.try_activate(&no_focus).is_none());

        let wrong_key = ActivationInput::KeyDown {
            key: Key::ArrowDown,
            focus_origin: Some(Point::ZERO),
        };
        assert!(sensors.try_activate(&wrong_key).is_none());

        let ok = ActivationInput::KeyDown {
            key: Key::Enter,
            focus_origin: Some(Point::new(3.0, 4.0)),
        };
        let (active, events) = sensors.try_activate(&ok).unwrap();
        assert!(matches!(active, ActiveSensor::Keyboard(_)));
        assert_eq!(
            events.as_slice(),
            &[SensorEvent::Activated {
                origin: Point::new(3.0, 4.0)
            }]
        );
    }

    #[test]
    fn priority_order_is_respected() {
        // A keyboard-only arbiter never claims pointer input.
        let sensors = Sensors::new(
            [SensorConfig::Keyboard {
                codes: KeyboardCodes::default(),
            }]
            .into(),
        );
        assert!(sensors.try_activate(&pointer_down(true)).is_none());
    }

    #[test]
    fn uniform_forwarding_ignores_foreign_modalities() {
        let sensors = Sensors::default();
        let (mut active, _) = sensors
            .try_activate(&ActivationInput::KeyDown {
                key: Key::Space,
                focus_origin: Some(Point::ZERO),
            })
            .unwrap();
        // Pointer-flavored calls are no-ops on a keyboard drag.
        assert!(active.motion(Point::new(50.0, 50.0), 16).is_empty());
        assert!(active.release().is_empty());
        assert!(active.is_active());
    }
}
