// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility oracle.

use keycopy_dom::{Page, Visibility};
use kurbo::{Point, Rect, Size};

/// Whether `element` is genuinely visible to the user.
///
/// All of the following must hold:
/// - computed opacity is non-zero and visibility is not hidden;
/// - the bounding box has positive area and intersects the viewport;
/// - a hit test a quarter of the way into the box (from its top-left corner)
///   lands on the element or one of its descendants, so boxes fully covered by
///   unrelated content are rejected.
pub fn is_visible<P: Page>(page: &P, element: P::Element) -> bool {
    let style = page.style(element);
    if style.opacity <= 0.0 || style.visibility == Visibility::Hidden {
        return false;
    }
    let rect = page.bounding_rect(element);
    if !intersects_viewport(rect, page.viewport().size) {
        return false;
    }
    page.element_from_point(probe_point(rect))
        .is_some_and(|hit| page.contains(element, hit))
}

fn intersects_viewport(rect: Rect, viewport: Size) -> bool {
    rect.width() > 0.0
        && rect.height() > 0.0
        && rect.y0 < viewport.height
        && rect.y1 > 0.0
        && rect.x0 < viewport.width
        && rect.x1 > 0.0
}

fn probe_point(rect: Rect) -> Point {
    Point::new(
        rect.x0 + rect.width() / 4.0,
        rect.y0 + rect.height() / 4.0,
    )
}
