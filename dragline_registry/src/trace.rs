// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration diagnostics.
//!
//! The registries never fail on anomalous registration traffic — duplicate
//! ids overwrite and stale unregistrations are ignored, because both happen
//! routinely in view trees that mount and unmount eagerly. But a test suite
//! (or a debug overlay) wants to *see* them. [`RegistryTrace`] is the hook:
//! registration entry points take a `&mut impl RegistryTrace<Id>` variant,
//! and [`AnomalyRecorder`] is a ready-made sink that just collects ids.
//!
//! The unit impl `()` discards everything, so production callers pay
//! nothing.

use alloc::vec::Vec;

/// A callback sink for registration anomalies.
///
/// All methods default to no-ops; implement only what you care about.
pub trait RegistryTrace<Id> {
    /// A draggable id was registered while an entry for it already existed.
    /// The previous entry has been replaced.
    fn duplicate_draggable(&mut self, _id: &Id) {}

    /// A droppable id was registered while an entry for it already existed.
    /// The previous entry has been replaced.
    fn duplicate_droppable(&mut self, _id: &Id) {}

    /// An unregistration carried a stale owner token and was ignored.
    fn stale_unregister(&mut self, _id: &Id) {}
}

impl<Id> RegistryTrace<Id> for () {}

/// Collects anomaly ids for inspection, typically in tests.
#[derive(Clone, Debug, Default)]
pub struct AnomalyRecorder<Id> {
    /// Ids re-registered while already present (both node kinds).
    pub duplicates: Vec<Id>,
    /// Ids whose unregistration was ignored for owner mismatch.
    pub stale_unregisters: Vec<Id>,
}

impl<Id: Clone> RegistryTrace<Id> for AnomalyRecorder<Id> {
    fn duplicate_draggable(&mut self, id: &Id) {
        self.duplicates.push(id.clone());
    }

    fn duplicate_droppable(&mut self, id: &Id) {
        self.duplicates.push(id.clone());
    }

    fn stale_unregister(&mut self, id: &Id) {
        self.stale_unregisters.push(id.clone());
    }
}

impl<Id> AnomalyRecorder<Id> {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duplicates: Vec::new(),
            stale_unregisters: Vec::new(),
        }
    }

    /// Returns `true` if nothing anomalous was observed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.stale_unregisters.is_empty()
    }
}
