// Copyright 2026 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rect helpers shared by collision scoring and keyboard navigation.

use kurbo::{Point, Rect};

/// The four corners of `rect` in top-left, top-right, bottom-left,
/// bottom-right order.
///
/// The order is part of the contract: corner-distance collision scoring
/// pairs corners positionally, so both rects must enumerate them the same
/// way.
#[must_use]
pub fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
}
