// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The droppable-node registry with cached, invalidation-driven measurement.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::MeasureNode;
use crate::trace::RegistryTrace;

bitflags::bitflags! {
    /// Why cached droppable rects were thrown away.
    ///
    /// Purely diagnostic: every reason invalidates the same way, but hosts
    /// batching layout work can inspect [`DroppableRegistry::take_pending_reasons`]
    /// to decide how urgently to re-collect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InvalidationReason: u8 {
        /// The window or a container resized.
        const RESIZE = 0b0000_0001;
        /// A scrollable ancestor scrolled.
        const SCROLL = 0b0000_0010;
        /// The coordinator or a sortable container asked explicitly.
        const EXPLICIT = 0b0000_0100;
    }
}

/// When the registry is allowed to run the measurer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MeasuringStrategy {
    /// Measure invalidated entries whenever a snapshot is collected.
    #[default]
    Always,
    /// Measure only while no drag is live; mid-drag snapshots reuse the
    /// cache (cheap, but tolerates drift).
    BeforeDragOnly,
    /// Measure only on an explicit [`DroppableRegistry::measure_now`] call.
    Explicit,
}

/// One registered droppable.
#[derive(Clone, Debug)]
pub struct DroppableEntry<H, D> {
    /// Opaque node handle, measured via [`MeasureNode`].
    pub handle: H,
    /// Caller payload.
    pub data: D,
    /// Disabled droppables stay registered but never appear in snapshots.
    pub disabled: bool,
    rect: Option<Rect>,
}

/// Registry of droppable nodes for one drag surface.
///
/// Rects are measured lazily on first need and cached until invalidated —
/// never eagerly per frame. Snapshots come back in registration order,
/// which downstream collision strategies rely on for stable tie-breaking.
#[derive(Clone, Debug)]
pub struct DroppableRegistry<Id, H, D> {
    entries: HashMap<Id, DroppableEntry<H, D>>,
    order: Vec<Id>,
    strategy: MeasuringStrategy,
    pending_reasons: InvalidationReason,
}

impl<Id, H, D> Default for DroppableRegistry<Id, H, D>
where
    Id: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(MeasuringStrategy::default())
    }
}

impl<Id, H, D> DroppableRegistry<Id, H, D>
where
    Id: Clone + Eq + Hash,
{
    /// Creates an empty registry with the given measuring strategy.
    #[must_use]
    pub fn new(strategy: MeasuringStrategy) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            strategy,
            pending_reasons: InvalidationReason::empty(),
        }
    }

    /// Registers `id`, replacing any existing entry (last writer wins).
    ///
    /// A replaced entry keeps its original position in registration order
    /// and drops its cached rect.
    pub fn register(&mut self, id: Id, handle: H, data: D) {
        self.register_traced(id, handle, data, &mut ());
    }

    /// Like [`DroppableRegistry::register`], reporting a replaced entry to
    /// `trace`.
    pub fn register_traced(
        &mut self,
        id: Id,
        handle: H,
        data: D,
        trace: &mut impl RegistryTrace<Id>,
    ) {
        if self.entries.contains_key(&id) {
            trace.duplicate_droppable(&id);
        } else {
            self.order.push(id.clone());
        }
        self.entries.insert(
            id,
            DroppableEntry {
                handle,
                data,
                disabled: false,
                rect: None,
            },
        );
    }

    /// Removes `id`. Returns `true` if it was registered.
    pub fn unregister(&mut self, id: &Id) -> bool {
        if self.entries.remove(id).is_some() {
            self.order.retain(|other| other != id);
            true
        } else {
            false
        }
    }

    /// Enables or disables `id` without unregistering it. Returns `false`
    /// for unknown ids.
    pub fn set_disabled(&mut self, id: &Id, disabled: bool) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Drops the cached rect for `id`.
    pub fn invalidate(&mut self, id: &Id) {
        self.pending_reasons |= InvalidationReason::EXPLICIT;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.rect = None;
        }
    }

    /// Drops the cached rects for `ids` — the sortable items-changed path.
    pub fn invalidate_many(&mut self, ids: &[Id]) {
        self.pending_reasons |= InvalidationReason::EXPLICIT;
        for id in ids {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.rect = None;
            }
        }
    }

    /// Drops every cached rect, recording why.
    pub fn invalidate_all(&mut self, reason: InvalidationReason) {
        self.pending_reasons |= reason;
        for entry in self.entries.values_mut() {
            entry.rect = None;
        }
    }

    /// Returns and clears the reasons accumulated since the last call.
    pub fn take_pending_reasons(&mut self) -> InvalidationReason {
        core::mem::take(&mut self.pending_reasons)
    }

    /// Collects `(id, rect)` for every enabled droppable, in registration
    /// order, as an owned snapshot.
    ///
    /// Whether missing rects are measured here depends on the strategy;
    /// entries that stay unmeasured (or whose measurer returns `None`) are
    /// skipped, not errored.
    pub fn collect_rects(
        &mut self,
        measurer: &mut impl MeasureNode<H>,
        drag_live: bool,
    ) -> Vec<(Id, Rect)> {
        let may_measure = match self.strategy {
            MeasuringStrategy::Always => true,
            MeasuringStrategy::BeforeDragOnly => !drag_live,
            MeasuringStrategy::Explicit => false,
        };
        let mut out = Vec::with_capacity(self.order.len());
        for id in &self.order {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            if entry.disabled {
                continue;
            }
            if entry.rect.is_none() && may_measure {
                entry.rect = measurer.measure(&entry.handle);
            }
            if let Some(rect) = entry.rect {
                out.push((id.clone(), rect));
            }
        }
        out
    }

    /// Measures every invalidated, enabled entry right now, regardless of
    /// strategy. The companion to [`MeasuringStrategy::Explicit`].
    pub fn measure_now(&mut self, measurer: &mut impl MeasureNode<H>) {
        for id in &self.order {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            if !entry.disabled && entry.rect.is_none() {
                entry.rect = measurer.measure(&entry.handle);
            }
        }
    }

    /// Looks up the entry for `id`.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<&DroppableEntry<H, D>> {
        self.entries.get(id)
    }

    /// The cached rect for `id`, if measured and valid.
    #[must_use]
    pub fn cached_rect(&self, id: &Id) -> Option<Rect> {
        self.entries.get(id).and_then(|e| e.rect)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.order.iter()
    }

    /// Number of registered droppables (disabled ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::AnomalyRecorder;

    /// Measurer that hands out a fixed rect per handle and counts calls.
    struct Fixture {
        calls: usize,
    }

    impl MeasureNode<Option<Rect>> for Fixture {
        fn measure(&mut self, handle: &Option<Rect>) -> Option<Rect> {
            self.calls += 1;
            *handle
        }
    }

    fn rect(i: f64) -> Rect {
        Rect::new(0.0, i * 100.0, 50.0, i * 100.0 + 50.0)
    }

    fn registry() -> DroppableRegistry<&'static str, Option<Rect>, ()> {
        let mut reg = DroppableRegistry::default();
        reg.register("a", Some(rect(0.0)), ());
        reg.register("b", Some(rect(1.0)), ());
        reg.register("c", Some(rect(2.0)), ());
        reg
    }

    #[test]
    fn snapshots_come_back_in_registration_order() {
        let mut reg = registry();
        let mut m = Fixture { calls: 0 };
        let rects = reg.collect_rects(&mut m, false);
        let ids: Vec<_> = rects.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn rects_are_cached_until_invalidated() {
        let mut reg = registry();
        let mut m = Fixture { calls: 0 };
        reg.collect_rects(&mut m, false);
        assert_eq!(m.calls, 3);

        // Second collection is served from cache.
        reg.collect_rects(&mut m, false);
        assert_eq!(m.calls, 3);

        reg.invalidate(&"b");
        reg.collect_rects(&mut m, false);
        assert_eq!(m.calls, 4);
    }

    #[test]
    fn invalidate_all_drops_every_cache_and_records_the_reason() {
        let mut reg = registry();
        let mut m = Fixture { calls: 0 };
        reg.collect_rects(&mut m, false);

        reg.invalidate_all(InvalidationReason::RESIZE);
        assert_eq!(reg.take_pending_reasons(), InvalidationReason::RESIZE);
        assert_eq!(reg.take_pending_reasons(), InvalidationReason::empty());

        reg.collect_rects(&mut m, false);
        assert_eq!(m.calls, 6);
    }

    #[test]
    fn disabled_droppables_are_excluded_but_stay_registered() {
        let mut reg = registry();
        let mut m = Fixture { calls: 0 };
        assert!(reg.set_disabled(&"b", true));
        let rects = reg.collect_rects(&mut m, false);
        let ids: Vec<_> = rects.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(reg.len(), 3);

        assert!(reg.set_disabled(&"b", false));
        assert_eq!(reg.collect_rects(&mut m, false).len(), 3);
    }

    #[test]
    fn unmeasurable_nodes_are_skipped_not_errors() {
        let mut reg = DroppableRegistry::<&str, Option<Rect>, ()>::default();
        reg.register("mounted", Some(rect(0.0)), ());
        reg.register("unmounted", None, ());
        let mut m = Fixture { calls: 0 };
        let rects = reg.collect_rects(&mut m, false);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, "mounted");
    }

    #[test]
    fn before_drag_only_freezes_measurement_mid_drag() {
        let mut reg = DroppableRegistry::<&str, Option<Rect>, ()>::new(
            MeasuringStrategy::BeforeDragOnly,
        );
        reg.register("a", Some(rect(0.0)), ());
        let mut m = Fixture { calls: 0 };

        // Invalidated + drag live: no measurement, candidate missing.
        reg.invalidate(&"a");
        assert!(reg.collect_rects(&mut m, true).is_empty());
        assert_eq!(m.calls, 0);

        // Drag over: measured again.
        assert_eq!(reg.collect_rects(&mut m, false).len(), 1);
        assert_eq!(m.calls, 1);

        // Mid-drag with a warm cache: served from cache.
        assert_eq!(reg.collect_rects(&mut m, true).len(), 1);
        assert_eq!(m.calls, 1);
    }

    #[test]
    fn explicit_strategy_measures_only_on_request() {
        let mut reg =
            DroppableRegistry::<&str, Option<Rect>, ()>::new(MeasuringStrategy::Explicit);
        reg.register("a", Some(rect(0.0)), ());
        let mut m = Fixture { calls: 0 };

        assert!(reg.collect_rects(&mut m, false).is_empty());
        assert_eq!(m.calls, 0);

        reg.measure_now(&mut m);
        assert_eq!(m.calls, 1);
        assert_eq!(reg.collect_rects(&mut m, false).len(), 1);
    }

    #[test]
    fn duplicate_registration_keeps_the_order_slot() {
        let mut reg = registry();
        let mut recorder = AnomalyRecorder::new();
        reg.register_traced("b", Some(rect(5.0)), (), &mut recorder);
        assert_eq!(recorder.duplicates, ["b"]);

        let mut m = Fixture { calls: 0 };
        let rects = reg.collect_rects(&mut m, false);
        let ids: Vec<_> = rects.iter().map(|(id, _)| *id).collect();
        // Still b's original position, with the new handle's rect.
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(rects[1].1, rect(5.0));
    }

    #[test]
    fn invalidate_many_targets_only_the_named_ids() {
        let mut reg = registry();
        let mut m = Fixture { calls: 0 };
        reg.collect_rects(&mut m, false);

        reg.invalidate_many(&["a", "c"]);
        reg.collect_rects(&mut m, false);
        assert_eq!(m.calls, 5);
    }

    #[test]
    fn unregister_removes_from_order() {
        let mut reg = registry();
        assert!(reg.unregister(&"b"));
        assert!(!reg.unregister(&"b"));
        let ids: Vec<_> = reg.ids().copied().collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
