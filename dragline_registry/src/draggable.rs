// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draggable-node registry.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::OwnerKey;
use crate::trace::RegistryTrace;

/// One registered draggable: an opaque node handle plus a caller payload.
///
/// `data` passes through the engine untouched — collision detection and
/// sorting never look at it.
#[derive(Clone, Debug)]
pub struct DraggableEntry<H, D> {
    /// Token of the registration that owns this entry.
    pub owner: OwnerKey,
    /// Opaque node handle, measured via [`MeasureNode`](crate::MeasureNode).
    pub handle: H,
    /// Caller payload, passed through to lifecycle consumers.
    pub data: D,
}

/// Registry of draggable nodes for one drag surface.
///
/// Registration returns an [`OwnerKey`]; pass it back to
/// [`DraggableRegistry::unregister`] so a stale teardown (an unmounted
/// instance whose id was immediately reused) cannot evict its successor.
#[derive(Clone, Debug)]
pub struct DraggableRegistry<Id, H, D> {
    entries: HashMap<Id, DraggableEntry<H, D>>,
    next_owner: u64,
}

impl<Id, H, D> Default for DraggableRegistry<Id, H, D> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_owner: 0,
        }
    }
}

impl<Id, H, D> DraggableRegistry<Id, H, D>
where
    Id: Clone + Eq + Hash,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`, replacing any existing entry (last writer wins).
    pub fn register(&mut self, id: Id, handle: H, data: D) -> OwnerKey {
        self.register_traced(id, handle, data, &mut ())
    }

    /// Like [`DraggableRegistry::register`], reporting a replaced entry to
    /// `trace`.
    pub fn register_traced(
        &mut self,
        id: Id,
        handle: H,
        data: D,
        trace: &mut impl RegistryTrace<Id>,
    ) -> OwnerKey {
        let owner = OwnerKey::new(self.next_owner);
        self.next_owner += 1;
        if self.entries.contains_key(&id) {
            trace.duplicate_draggable(&id);
        }
        self.entries
            .insert(id, DraggableEntry { owner, handle, data });
        owner
    }

    /// Removes `id` if `owner` still owns it.
    ///
    /// Returns `true` on eviction. A mismatched owner means the entry was
    /// re-registered since; the call is ignored and `false` returned.
    pub fn unregister(&mut self, id: &Id, owner: OwnerKey) -> bool {
        self.unregister_traced(id, owner, &mut ())
    }

    /// Like [`DraggableRegistry::unregister`], reporting an ignored stale
    /// call to `trace`.
    pub fn unregister_traced(
        &mut self,
        id: &Id,
        owner: OwnerKey,
        trace: &mut impl RegistryTrace<Id>,
    ) -> bool {
        match self.entries.get(id) {
            Some(entry) if entry.owner == owner => {
                self.entries.remove(id);
                true
            }
            Some(_) => {
                trace.stale_unregister(id);
                false
            }
            None => false,
        }
    }

    /// Looks up the entry for `id`.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<&DraggableEntry<H, D>> {
        self.entries.get(id)
    }

    /// Returns `true` if `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered draggables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::AnomalyRecorder;

    #[test]
    fn register_then_unregister_round_trips() {
        let mut reg = DraggableRegistry::<u32, (), ()>::new();
        let owner = reg.register(1, (), ());
        assert!(reg.contains(&1));
        assert!(reg.unregister(&1, owner));
        assert!(reg.is_empty());
    }

    #[test]
    fn owner_keys_are_never_reused() {
        let mut reg = DraggableRegistry::<u32, (), ()>::new();
        let a = reg.register(1, (), ());
        reg.unregister(&1, a);
        let b = reg.register(1, (), ());
        assert_ne!(a, b);
    }

    #[test]
    fn stale_owner_cannot_evict_the_remounted_entry() {
        let mut reg = DraggableRegistry::<u32, &str, ()>::new();
        let old = reg.register(1, "first mount", ());
        // Remount under the same id before the old teardown runs.
        let new = reg.register(1, "second mount", ());

        // The old instance's teardown fires late — and is ignored.
        assert!(!reg.unregister(&1, old));
        assert_eq!(reg.get(&1).unwrap().handle, "second mount");

        // The current owner can still evict.
        assert!(reg.unregister(&1, new));
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_registration_is_last_writer_wins_and_traced() {
        let mut reg = DraggableRegistry::<u32, &str, ()>::new();
        let mut recorder = AnomalyRecorder::new();
        reg.register_traced(1, "a", (), &mut recorder);
        assert!(recorder.is_clean());

        reg.register_traced(1, "b", (), &mut recorder);
        assert_eq!(recorder.duplicates, [1]);
        assert_eq!(reg.get(&1).unwrap().handle, "b");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn stale_unregister_is_traced() {
        let mut reg = DraggableRegistry::<u32, (), ()>::new();
        let mut recorder = AnomalyRecorder::new();
        let old = reg.register(1, (), ());
        reg.register(1, (), ());
        reg.unregister_traced(&1, old, &mut recorder);
        assert_eq!(recorder.stale_unregisters, [1]);
    }

    #[test]
    fn unregister_of_unknown_id_is_a_quiet_no_op() {
        let mut reg = DraggableRegistry::<u32, (), ()>::new();
        let owner = reg.register(1, (), ());
        reg.unregister(&1, owner);
        assert!(!reg.unregister(&1, owner));
    }
}
