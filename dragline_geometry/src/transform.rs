// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D render instruction handed to the UI layer.

use kurbo::Vec2;

/// A pure rendering instruction: translate by `(x, y)`, scale by
/// `(scale_x, scale_y)`.
///
/// A `Transform` is derived state. The session coordinator produces one for
/// the actively dragged element and the sortable engine produces one per
/// shifted list item; both recompute it from scratch whenever their inputs
/// change. Nothing in the engine stores a `Transform` across ticks.
///
/// The scale factors exist for drop-animation and overlay use cases; the
/// built-in sorting strategies only ever translate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal translation in logical pixels.
    pub x: f64,
    /// Vertical translation in logical pixels.
    pub y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Transform {
    /// The identity transform: no translation, unit scale.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// A pure translation by `v` with unit scale.
    #[must_use]
    pub const fn translation(v: Vec2) -> Self {
        Self {
            x: v.x,
            y: v.y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Returns `true` if applying this transform changes nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The translation component as a vector.
    #[must_use]
    pub const fn vector(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Vec2> for Transform {
    fn from(v: Vec2) -> Self {
        Self::translation(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert!(Transform::IDENTITY.is_identity());
    }

    #[test]
    fn translation_round_trips_through_vector() {
        let v = Vec2::new(-3.5, 12.0);
        let t = Transform::translation(v);
        assert_eq!(t.vector(), v);
        assert!(!t.is_identity());
        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn zero_translation_is_identity() {
        assert!(Transform::translation(Vec2::ZERO).is_identity());
    }

    #[test]
    fn from_vec2_matches_translation() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(Transform::from(v), Transform::translation(v));
    }
}
