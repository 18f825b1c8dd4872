// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session coordinator.

use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use kurbo::{Point, Rect, Size, Vec2};

use dragline_collision::{CollisionArgs, CollisionStrategy};
use dragline_geometry::Transform;
use dragline_geometry::scroll::ScrollAccumulator;
use dragline_registry::draggable::DraggableRegistry;
use dragline_registry::droppable::{DroppableRegistry, InvalidationReason, MeasuringStrategy};
use dragline_registry::{MeasureNode, OwnerKey};
use dragline_sensors::keyboard::{CoordinateGetter, Key};
use dragline_sensors::{ActivationInput, ActiveSensor, SensorEvent, Sensors};

use crate::error::{ResolveError, StartError};
use crate::events::{DragEvent, SessionEvents};

/// The externally visible lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session.
    Idle,
    /// A sensor claimed an input but its activation constraint is pending.
    Initializing,
    /// A drag is live.
    Dragging,
    /// Released; awaiting the caller's drop decision.
    PendingDrop,
}

/// Coordinator construction options.
#[derive(Copy, Clone, Debug, Default)]
pub struct CoordinatorOptions {
    /// Measurement cadence for droppable rects.
    pub measuring: MeasuringStrategy,
    /// When `true`, release parks the session in
    /// [`SessionPhase::PendingDrop`] until
    /// [`DragCoordinator::resolve_drop`] is called.
    pub confirm_drops: bool,
}

/// A live drag's working state.
#[derive(Clone, Debug)]
struct Live<Id> {
    active: Id,
    sensor: ActiveSensor,
    origin: Point,
    initial_rect: Option<Rect>,
    pointer_delta: Vec2,
    position: Point,
    over: Option<Id>,
}

#[derive(Clone, Debug)]
enum Phase<Id> {
    Idle,
    Initializing { active: Id, sensor: ActiveSensor },
    Dragging(Live<Id>),
    PendingDrop { active: Id, over: Option<Id>, delta: Vec2 },
}

/// The state machine owning the active drag for one drag surface.
///
/// The coordinator owns the draggable/droppable registries, the sensor
/// arbiter, and one collision strategy. Hosts feed it raw input; every call
/// returns the ordered [`DragEvent`]s that input produced, and snapshot
/// accessors ([`DragCoordinator::active_transform`],
/// [`DragCoordinator::over`], …) expose the state between events. This
/// snapshot-plus-events contract is the whole subscription surface — there
/// is no ambient context to reach through.
///
/// Exactly one session exists at a time; [`DragCoordinator::start`] while
/// one is in flight fails with [`StartError::SessionActive`] and mutates
/// nothing.
#[derive(Clone, Debug)]
pub struct DragCoordinator<Id, H, D, S> {
    draggables: DraggableRegistry<Id, H, D>,
    droppables: DroppableRegistry<Id, H, D>,
    sensors: Sensors,
    strategy: S,
    scroll: ScrollAccumulator<u64>,
    confirm_drops: bool,
    phase: Phase<Id>,
}

impl<Id, H, D, S> DragCoordinator<Id, H, D, S>
where
    Id: Clone + Eq + Hash,
    S: CollisionStrategy<Id>,
{
    /// Creates a coordinator with default options.
    #[must_use]
    pub fn new(sensors: Sensors, strategy: S) -> Self {
        Self::with_options(sensors, strategy, CoordinatorOptions::default())
    }

    /// Creates a coordinator with explicit options.
    #[must_use]
    pub fn with_options(sensors: Sensors, strategy: S, options: CoordinatorOptions) -> Self {
        Self {
            draggables: DraggableRegistry::new(),
            droppables: DroppableRegistry::new(options.measuring),
            sensors,
            strategy,
            scroll: ScrollAccumulator::new(),
            confirm_drops: options.confirm_drops,
            phase: Phase::Idle,
        }
    }

    // --- Registration -----------------------------------------------------

    /// Registers a draggable; consumers call this on mount.
    pub fn register_draggable(&mut self, id: Id, handle: H, data: D) -> OwnerKey {
        self.draggables.register(id, handle, data)
    }

    /// Unregisters a draggable; consumers call this on unmount with the
    /// token their registration returned.
    ///
    /// If the evicted node is the one being dragged, the session is
    /// force-cancelled and the synthetic [`DragEvent::Cancelled`] comes
    /// back — never a silent no-op, so `Cancelled` handlers are a reliable
    /// cleanup point.
    pub fn unregister_draggable(&mut self, id: &Id, owner: OwnerKey) -> SessionEvents<Id> {
        let evicted = self.draggables.unregister(id, owner);
        let mut out = SessionEvents::new();
        if evicted && self.active_id() == Some(id) {
            match mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Dragging(live) => {
                    self.scroll.clear();
                    out.push(DragEvent::Cancelled { active: live.active });
                }
                Phase::PendingDrop { active, .. } => {
                    self.scroll.clear();
                    out.push(DragEvent::Cancelled { active });
                }
                // Nothing started yet; nothing for consumers to undo.
                Phase::Initializing { .. } | Phase::Idle => {}
            }
        }
        out
    }

    /// Registers a droppable; consumers call this on mount.
    pub fn register_droppable(&mut self, id: Id, handle: H, data: D) {
        self.droppables.register(id, handle, data);
    }

    /// Unregisters a droppable. Returns `true` if it was registered.
    ///
    /// A droppable vanishing mid-drag is not an abort: collision detection
    /// simply stops seeing it.
    pub fn unregister_droppable(&mut self, id: &Id) -> bool {
        self.droppables.unregister(id)
    }

    /// Enables or disables a droppable without unregistering it.
    pub fn set_droppable_disabled(&mut self, id: &Id, disabled: bool) -> bool {
        self.droppables.set_disabled(id, disabled)
    }

    /// Drops the cached rects for `ids` — issued by sortable containers
    /// whose item sequence changed.
    pub fn invalidate_droppables(&mut self, ids: &[Id]) {
        self.droppables.invalidate_many(ids);
    }

    /// Drops every cached droppable rect (resize, theme change, …).
    pub fn invalidate_all_droppables(&mut self, reason: InvalidationReason) {
        self.droppables.invalidate_all(reason);
    }

    /// Read access to the draggable registry.
    #[must_use]
    pub fn draggables(&self) -> &DraggableRegistry<Id, H, D> {
        &self.draggables
    }

    /// Read access to the droppable registry.
    #[must_use]
    pub fn droppables(&self) -> &DroppableRegistry<Id, H, D> {
        &self.droppables
    }

    // --- Session lifecycle ------------------------------------------------

    /// Offers an activation input for draggable `id`.
    ///
    /// The host resolves hit testing/focus first: `id` names the draggable
    /// the input landed on. Fails without touching any state if a session
    /// is already in flight, the id is unknown, or no sensor claims the
    /// input. On success the returned events are empty while an activation
    /// constraint is still pending.
    pub fn start(
        &mut self,
        id: Id,
        input: &ActivationInput,
        measurer: &mut impl MeasureNode<H>,
    ) -> Result<SessionEvents<Id>, StartError> {
        if !matches!(self.phase, Phase::Idle) {
            return Err(StartError::SessionActive);
        }
        if !self.draggables.contains(&id) {
            return Err(StartError::UnknownDraggable);
        }
        let Some((sensor, events)) = self.sensors.try_activate(input) else {
            return Err(StartError::NoSensor);
        };
        self.phase = Phase::Initializing { active: id, sensor };
        Ok(self.apply_sensor_events(events, measurer))
    }

    /// Continuous pointer/touch movement.
    pub fn pointer_move(
        &mut self,
        position: Point,
        now_ms: u64,
        measurer: &mut impl MeasureNode<H>,
    ) -> SessionEvents<Id> {
        let events = match &mut self.phase {
            Phase::Initializing { sensor, .. } | Phase::Dragging(Live { sensor, .. }) => {
                sensor.motion(position, now_ms)
            }
            _ => return SessionEvents::new(),
        };
        let out = self.apply_sensor_events(events, measurer);
        self.settle_initializing();
        out
    }

    /// Clock tick; fires pending delay constraints.
    pub fn poll(&mut self, now_ms: u64, measurer: &mut impl MeasureNode<H>) -> SessionEvents<Id> {
        let events = match &mut self.phase {
            Phase::Initializing { sensor, .. } | Phase::Dragging(Live { sensor, .. }) => {
                sensor.poll(now_ms)
            }
            _ => return SessionEvents::new(),
        };
        self.apply_sensor_events(events, measurer)
    }

    /// A key press routed to a live keyboard session.
    pub fn key_input(
        &mut self,
        key: Key,
        getter: &impl CoordinateGetter,
        measurer: &mut impl MeasureNode<H>,
    ) -> SessionEvents<Id> {
        let active_rect = match &self.phase {
            Phase::Dragging(live) if matches!(live.sensor, ActiveSensor::Keyboard(_)) => {
                let total = live.pointer_delta + self.scroll.total();
                base_rect(live) + total
            }
            _ => return SessionEvents::new(),
        };
        let rects: Vec<Rect> = self
            .droppables
            .collect_rects(measurer, true)
            .into_iter()
            .map(|(_, rect)| rect)
            .collect();
        let events = match &mut self.phase {
            Phase::Dragging(live) => {
                live.sensor
                    .key_input(key, getter, Some(active_rect), &rects)
            }
            _ => return SessionEvents::new(),
        };
        self.apply_sensor_events(events, measurer)
    }

    /// Pointer/touch released.
    pub fn release(&mut self) -> SessionEvents<Id> {
        let events = match &mut self.phase {
            Phase::Initializing { sensor, .. } | Phase::Dragging(Live { sensor, .. }) => {
                sensor.release()
            }
            _ => return SessionEvents::new(),
        };
        let mut out = SessionEvents::new();
        for event in events {
            match event {
                SensorEvent::Ended => self.on_released(&mut out),
                SensorEvent::Cancelled => self.on_cancelled(&mut out),
                SensorEvent::Activated { .. } | SensorEvent::Moved { .. } => {}
            }
        }
        self.settle_initializing();
        out
    }

    /// Escape pressed. Cancels a live session immediately — including one
    /// parked in [`SessionPhase::PendingDrop`], whose later resolution is
    /// then discarded.
    pub fn escape(&mut self) -> SessionEvents<Id> {
        self.force_cancel()
    }

    /// The window lost focus or the page was hidden. Same semantics as
    /// [`DragCoordinator::escape`].
    pub fn window_blur(&mut self) -> SessionEvents<Id> {
        self.force_cancel()
    }

    /// The platform recognized a native scroll for the current touch
    /// sequence (drag-vs-scroll race).
    pub fn native_scroll(&mut self) {
        if let Phase::Initializing { sensor, .. } | Phase::Dragging(Live { sensor, .. }) =
            &mut self.phase
        {
            sensor.native_scroll();
        }
        self.settle_initializing();
    }

    /// A scrollable ancestor of the active draggable scrolled to `offset`.
    ///
    /// Observe each ancestor once right after the drag starts to establish
    /// its baseline; later observations accumulate against it. The summed
    /// scroll delta joins the pointer delta, keeping the dragged rect under
    /// the pointer while the page moves underneath it. Cached droppable
    /// rects are invalidated and the tick re-resolves collisions. Ignored
    /// while a drop decision is pending.
    pub fn record_scroll(
        &mut self,
        ancestor: u64,
        offset: Vec2,
        measurer: &mut impl MeasureNode<H>,
    ) -> SessionEvents<Id> {
        if !matches!(self.phase, Phase::Dragging(_)) {
            return SessionEvents::new();
        }
        self.scroll.observe(ancestor, offset);
        self.droppables.invalidate_all(InvalidationReason::SCROLL);
        let mut out = SessionEvents::new();
        self.retick(measurer, &mut out);
        out
    }

    /// Resolves a pending drop: `true` commits, `false` reverts.
    ///
    /// Fails with [`ResolveError::NotPending`] if nothing is pending — in
    /// particular after Escape or blur pre-empted the decision, in which
    /// case the late result is deliberately discarded.
    ///
    /// Callers running a fallible confirmation predicate should report a
    /// *failed* predicate as `true` (fail-open): a stuck approval must not
    /// strand the UI mid-drag. Surprising, but deliberate — a rejecting
    /// confirmer whose failure should cancel must map the failure itself.
    pub fn resolve_drop(&mut self, confirm: bool) -> Result<SessionEvents<Id>, ResolveError> {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::PendingDrop { active, over, .. } => {
                self.scroll.clear();
                let mut out = SessionEvents::new();
                if confirm {
                    out.push(DragEvent::Ended { active, over });
                } else {
                    out.push(DragEvent::Cancelled { active });
                }
                Ok(out)
            }
            other => {
                self.phase = other;
                Err(ResolveError::NotPending)
            }
        }
    }

    // --- Snapshots --------------------------------------------------------

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Idle => SessionPhase::Idle,
            Phase::Initializing { .. } => SessionPhase::Initializing,
            Phase::Dragging(_) => SessionPhase::Dragging,
            Phase::PendingDrop { .. } => SessionPhase::PendingDrop,
        }
    }

    /// The id being dragged, in any non-idle phase.
    #[must_use]
    pub fn active_id(&self) -> Option<&Id> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Initializing { active, .. } => Some(active),
            Phase::Dragging(live) => Some(&live.active),
            Phase::PendingDrop { active, .. } => Some(active),
        }
    }

    /// The droppable currently resolved as the best collision match.
    #[must_use]
    pub fn over(&self) -> Option<&Id> {
        match &self.phase {
            Phase::Dragging(live) => live.over.as_ref(),
            Phase::PendingDrop { over, .. } => over.as_ref(),
            Phase::Idle | Phase::Initializing { .. } => None,
        }
    }

    /// Total translation since activation: pointer delta plus accumulated
    /// ancestor scroll.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        match &self.phase {
            Phase::Dragging(live) => live.pointer_delta + self.scroll.total(),
            Phase::PendingDrop { delta, .. } => *delta,
            Phase::Idle | Phase::Initializing { .. } => Vec2::ZERO,
        }
    }

    /// The render transform for the dragged element's overlay, or `None`
    /// when nothing is being dragged.
    #[must_use]
    pub fn active_transform(&self) -> Option<Transform> {
        match self.phase {
            Phase::Dragging(_) | Phase::PendingDrop { .. } => {
                Some(Transform::translation(self.delta()))
            }
            Phase::Idle | Phase::Initializing { .. } => None,
        }
    }

    /// The active draggable's rect as measured at activation.
    #[must_use]
    pub fn initial_rect(&self) -> Option<Rect> {
        match &self.phase {
            Phase::Dragging(live) => live.initial_rect,
            _ => None,
        }
    }

    // --- Internals --------------------------------------------------------

    fn apply_sensor_events(
        &mut self,
        events: dragline_sensors::SensorEvents,
        measurer: &mut impl MeasureNode<H>,
    ) -> SessionEvents<Id> {
        let mut out = SessionEvents::new();
        for event in events {
            match event {
                SensorEvent::Activated { origin } => self.on_activated(origin, measurer, &mut out),
                SensorEvent::Moved { delta, position } => {
                    self.on_moved(delta, position, measurer, &mut out);
                }
                SensorEvent::Ended => self.on_released(&mut out),
                SensorEvent::Cancelled => self.on_cancelled(&mut out),
            }
        }
        out
    }

    fn on_activated(
        &mut self,
        origin: Point,
        measurer: &mut impl MeasureNode<H>,
        out: &mut SessionEvents<Id>,
    ) {
        let (active, sensor) = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Initializing { active, sensor } => (active, sensor),
            other => {
                self.phase = other;
                return;
            }
        };
        let initial_rect = self
            .draggables
            .get(&active)
            .and_then(|entry| measurer.measure(&entry.handle));
        self.phase = Phase::Dragging(Live {
            active: active.clone(),
            sensor,
            origin,
            initial_rect,
            pointer_delta: Vec2::ZERO,
            position: origin,
            over: None,
        });
        out.push(DragEvent::Started { active });
        // Initial collision pass at zero delta; only an over *change* emits.
        self.resolve_over_change(measurer, out);
    }

    fn on_moved(
        &mut self,
        delta: Vec2,
        position: Point,
        measurer: &mut impl MeasureNode<H>,
        out: &mut SessionEvents<Id>,
    ) {
        {
            let Phase::Dragging(live) = &mut self.phase else {
                return;
            };
            live.pointer_delta = delta;
            live.position = position;
        }
        self.retick(measurer, out);
    }

    /// Emits a `Moved` for the current state, then re-resolves collisions.
    fn retick(&mut self, measurer: &mut impl MeasureNode<H>, out: &mut SessionEvents<Id>) {
        let active = {
            let Phase::Dragging(live) = &self.phase else {
                return;
            };
            live.active.clone()
        };
        out.push(DragEvent::Moved {
            active,
            delta: self.delta(),
        });
        self.resolve_over_change(measurer, out);
    }

    fn resolve_over_change(
        &mut self,
        measurer: &mut impl MeasureNode<H>,
        out: &mut SessionEvents<Id>,
    ) {
        let (active, active_rect, pointer, old_over) = {
            let Phase::Dragging(live) = &self.phase else {
                return;
            };
            let total = live.pointer_delta + self.scroll.total();
            let pointer = match live.sensor {
                // Keyboard positions are synthetic, not pointer coordinates.
                ActiveSensor::Keyboard(_) => None,
                _ => Some(live.position),
            };
            (
                live.active.clone(),
                base_rect(live) + total,
                pointer,
                live.over.clone(),
            )
        };
        let droppables = self.droppables.collect_rects(measurer, true);
        let args = CollisionArgs {
            active_rect,
            pointer,
            droppables: &droppables,
        };
        let over = self
            .strategy
            .detect(&args)
            .into_iter()
            .next()
            .map(|hit| hit.id);
        if over != old_over {
            if let Phase::Dragging(live) = &mut self.phase {
                live.over = over.clone();
            }
            out.push(DragEvent::OverChanged { active, over });
        }
    }

    fn on_released(&mut self, out: &mut SessionEvents<Id>) {
        let live = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(live) => live,
            other => {
                self.phase = other;
                return;
            }
        };
        let delta = live.pointer_delta + self.scroll.total();
        if self.confirm_drops {
            out.push(DragEvent::DropPending {
                active: live.active.clone(),
                over: live.over.clone(),
            });
            self.phase = Phase::PendingDrop {
                active: live.active,
                over: live.over,
                delta,
            };
        } else {
            self.scroll.clear();
            out.push(DragEvent::Ended {
                active: live.active,
                over: live.over,
            });
        }
    }

    fn on_cancelled(&mut self, out: &mut SessionEvents<Id>) {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(live) => {
                self.scroll.clear();
                out.push(DragEvent::Cancelled { active: live.active });
            }
            other => self.phase = other,
        }
    }

    fn force_cancel(&mut self) -> SessionEvents<Id> {
        let mut out = SessionEvents::new();
        // Pre-empt a pending drop decision; its late resolution is discarded.
        if matches!(self.phase, Phase::PendingDrop { .. }) {
            if let Phase::PendingDrop { active, .. } = mem::replace(&mut self.phase, Phase::Idle) {
                self.scroll.clear();
                out.push(DragEvent::Cancelled { active });
            }
            return out;
        }
        let events = match &mut self.phase {
            Phase::Initializing { sensor, .. } | Phase::Dragging(Live { sensor, .. }) => {
                sensor.escape()
            }
            Phase::Idle | Phase::PendingDrop { .. } => return out,
        };
        for event in events {
            if event == SensorEvent::Cancelled {
                self.on_cancelled(&mut out);
                break;
            }
        }
        self.settle_initializing();
        out
    }

    /// Collapses an initializing phase whose sensor gave up (delay
    /// tolerance exceeded, scroll race lost, released early).
    fn settle_initializing(&mut self) {
        if let Phase::Initializing { sensor, .. } = &self.phase
            && !sensor.is_pending()
            && !sensor.is_active()
        {
            self.phase = Phase::Idle;
        }
    }
}

/// The rect the drag translates: the measured initial rect, or a
/// zero-sized rect at the activation origin when the node was
/// unmeasurable.
fn base_rect<Id>(live: &Live<Id>) -> Rect {
    live.initial_rect
        .unwrap_or_else(|| Rect::from_origin_size(live.origin, Size::ZERO))
}
