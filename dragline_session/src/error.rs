// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for invalid session operations.

use core::fmt;

/// Why a session could not be started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartError {
    /// A session is already in flight; exactly one may exist at a time.
    SessionActive,
    /// The requested id is not a registered draggable.
    UnknownDraggable,
    /// No sensor claimed the activation input.
    NoSensor,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionActive => write!(f, "a drag session is already active"),
            Self::UnknownDraggable => write!(f, "id is not a registered draggable"),
            Self::NoSensor => write!(f, "no sensor claimed the activation input"),
        }
    }
}

impl core::error::Error for StartError {}

/// Why a drop resolution was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// No drop is pending; the session was pre-empted or never parked.
    NotPending,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPending => write!(f, "no drop decision is pending"),
        }
    }
}

impl core::error::Error for ResolveError {}
