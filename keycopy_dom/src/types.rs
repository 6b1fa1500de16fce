// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the page model: element identifiers, flags, style, and viewport.

use kurbo::{Rect, Size};

/// Identifier for an element in a [`DomTree`](crate::DomTree).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Stale ids never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling rendering, hit testing, and input capability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// `visibility: visible`. Hidden elements (and their subtree) are skipped by hit testing.
        const VISIBLE  = 0b0000_0001;
        /// Text-input capable (input, textarea, or content-editable).
        const EDITABLE = 0b0000_0010;
        /// Positioned relative to the viewport; does not move when the page scrolls.
        const FIXED    = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Computed `visibility` of an element.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    /// The element is rendered.
    #[default]
    Visible,
    /// The element occupies space but is not rendered or hit-testable.
    Hidden,
}

/// The slice of computed style the hint engine cares about.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Computed opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Computed visibility.
    pub visibility: Visibility,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            visibility: Visibility::Visible,
        }
    }
}

/// A child node of an element: either a nested element or a text node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChildNode<'a, E> {
    /// A child element.
    Element(E),
    /// A text node and its raw content.
    Text(&'a str),
}

impl<'a, E: Copy> ChildNode<'a, E> {
    /// Returns the element if this is an element child.
    pub fn element(self) -> Option<E> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    /// Returns the text if this is a text child.
    pub fn text(self) -> Option<&'a str> {
        match self {
            Self::Element(_) => None,
            Self::Text(t) => Some(t),
        }
    }
}

/// The layout viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Size in CSS pixels.
    pub size: Size,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Create a viewport with a device pixel ratio of `1.0`.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            device_pixel_ratio: 1.0,
        }
    }

    /// The viewport as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// The viewport size in device pixels.
    pub fn device_size(&self) -> Size {
        self.size * self.device_pixel_ratio
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
