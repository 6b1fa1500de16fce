// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page capability consumed by the hint engine.
//!
//! ## Overview
//!
//! A [`Page`] exposes a read-only view of the host document: the element tree,
//! text nodes, computed style, viewport-space geometry, hit testing, and focus.
//! Elements are opaque keys; the engine never mutates them and keeps any derived
//! data in its own side tables.
//!
//! [`DomTree`](crate::DomTree) is the in-memory implementation shipped with this crate.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::{ChildNode, ComputedStyle, Viewport};

/// Read-only access to a laid-out page.
pub trait Page {
    /// Opaque element key.
    type Element: Copy + Eq + core::fmt::Debug;

    /// The document element, or `None` for an empty page.
    fn root(&self) -> Option<Self::Element>;

    /// The parent element of `element`, or `None` for the root.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Child nodes (elements and text) of `element` in document order.
    fn child_nodes(
        &self,
        element: Self::Element,
    ) -> impl Iterator<Item = ChildNode<'_, Self::Element>> + '_;

    /// Computed style of `element`.
    fn style(&self, element: Self::Element) -> ComputedStyle;

    /// Border box of `element` in viewport coordinates, as of the current scroll position.
    fn bounding_rect(&self, element: Self::Element) -> Rect;

    /// The current viewport.
    fn viewport(&self) -> Viewport;

    /// The topmost hit-testable element at a viewport-space point.
    fn element_from_point(&self, pt: Point) -> Option<Self::Element>;

    /// Whether `element` accepts text input (input, textarea, content-editable).
    fn is_text_input(&self, element: Self::Element) -> bool;

    /// The element that currently has keyboard focus.
    fn focused(&self) -> Option<Self::Element>;

    /// Child elements of `element` in document order.
    fn children(&self, element: Self::Element) -> impl Iterator<Item = Self::Element> + '_ {
        self.child_nodes(element).filter_map(ChildNode::element)
    }

    /// Whether `element` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Element, element: Self::Element) -> bool {
        let mut cur = Some(element);
        while let Some(e) = cur {
            if e == ancestor {
                return true;
            }
            cur = self.parent(e);
        }
        false
    }

    /// Concatenated text of every text node under `element`, in document order.
    fn text_content(&self, element: Self::Element) -> String {
        let mut out = String::new();
        let mut stack: Vec<ChildNode<'_, Self::Element>> = self.child_nodes(element).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            match node {
                ChildNode::Text(t) => out.push_str(t),
                ChildNode::Element(e) => {
                    let start = stack.len();
                    stack.extend(self.child_nodes(e));
                    stack[start..].reverse();
                }
            }
        }
        out
    }
}
