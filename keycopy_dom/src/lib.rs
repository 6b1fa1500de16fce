// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycopy DOM: the page capability consumed by keyboard hint engines, plus an
//! in-memory document that implements it.
//!
//! - [`Page`]: read-only access to the element tree, text nodes, computed style,
//!   viewport-space geometry, hit testing, and focus of a laid-out page.
//! - [`DomTree`]: a spatial element tree with z-order, scrolling, fixed positioning,
//!   visibility flags, and hit testing. It stands in for a live document in tests,
//!   benchmarks, demos, and headless hosts.
//!
//! ## Not a layout engine
//!
//! [`DomTree`] does not measure or arrange anything.
//! Callers place every element's border box directly; the tree only answers
//! geometry and hit-testing questions about those boxes.
//!
//! ## API overview
//!
//! - [`DomTree::insert`] → [`ElementId`], [`DomTree::push_text`] for text nodes.
//! - [`DomTree::set_bounds`], [`DomTree::set_flags`], [`DomTree::set_opacity`], [`DomTree::set_z_index`].
//! - [`DomTree::scroll_by`] / [`DomTree::scroll_to`] and [`DomTree::set_viewport`].
//! - [`DomTree::hit_test_point`], exposed through [`Page::element_from_point`].
//!
//! ### Minimal usage
//!
//! ```
//! use keycopy_dom::{DomTree, LocalElement, Page, Viewport};
//! use kurbo::{Point, Rect, Vec2};
//!
//! let mut page = DomTree::new(Viewport::new(800.0, 600.0));
//! let body = page.insert(
//!     None,
//!     LocalElement { bounds: Rect::new(0.0, 0.0, 800.0, 2000.0), ..Default::default() },
//! );
//! let para = page.insert(
//!     Some(body),
//!     LocalElement { bounds: Rect::new(10.0, 700.0, 300.0, 720.0), ..Default::default() },
//! );
//! page.push_text(para, "hello");
//!
//! // Below the fold until we scroll.
//! assert_eq!(page.element_from_point(Point::new(20.0, 705.0)), None);
//! page.scroll_by(Vec2::new(0.0, 650.0));
//! assert_eq!(page.element_from_point(Point::new(20.0, 55.0)), Some(para));
//! assert_eq!(page.text_content(body), "hello");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod page;
mod tree;
mod types;

pub use page::Page;
pub use tree::{DomTree, LocalElement};
pub use types::{ChildNode, ComputedStyle, ElementFlags, ElementId, Viewport, Visibility};
