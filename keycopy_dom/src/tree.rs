// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::page::Page;
use crate::types::{ChildNode, ComputedStyle, ElementFlags, ElementId, Viewport, Visibility};

/// Local data for an element.
#[derive(Clone, Debug)]
pub struct LocalElement {
    /// Border box in document coordinates (viewport coordinates for [`ElementFlags::FIXED`]).
    pub bounds: Rect,
    /// Z-order. Higher is drawn on top; ties resolve to the later element in document order.
    pub z_index: i32,
    /// Own opacity. Not inherited, matching computed-style semantics.
    pub opacity: f64,
    /// Visibility, input, and positioning flags.
    pub flags: ElementFlags,
}

impl Default for LocalElement {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            z_index: 0,
            opacity: 1.0,
            flags: ElementFlags::default(),
        }
    }
}

#[derive(Clone, Debug)]
enum Child {
    Element(ElementId),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<Child>,
    local: LocalElement,
}

/// An in-memory document: an element tree with text nodes, geometry, z-order,
/// scrolling, focus, and hit testing.
///
/// Implements [`Page`] so it can stand in for a live document.
pub struct DomTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: Option<ElementId>,
    viewport: Viewport,
    scroll: Vec2,
    focus: Option<ElementId>,
}

impl core::fmt::Debug for DomTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("DomTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl DomTree {
    /// Create an empty document with the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
            viewport,
            scroll: Vec2::ZERO,
            focus: None,
        }
    }

    /// Insert a new element as the last child of `parent`.
    ///
    /// With `parent == None` the element becomes the document element, replacing
    /// any previous root (which stays allocated but unreachable until removed).
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        let id = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node {
                generation,
                parent: None,
                children: Vec::new(),
                local,
            });
            slot_id(idx, generation)
        } else {
            self.nodes.push(Some(Node {
                generation: 1,
                parent: None,
                children: Vec::new(),
                local,
            }));
            self.generations.push(1);
            slot_id(self.nodes.len() - 1, 1)
        };
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => {
                self.node_mut(p).children.push(Child::Element(id));
                self.node_mut(id).parent = Some(p);
            }
            None => self.root = Some(id),
        }
        id
    }

    /// Append a text node as the last child of `element`.
    pub fn push_text(&mut self, element: ElementId, text: impl Into<String>) {
        if let Some(node) = self.node_opt_mut(element) {
            node.children.push(Child::Text(text.into()));
        }
    }

    /// Remove an element (and its subtree) from the document.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            let p = self.node_mut(parent);
            p.children
                .retain(|c| !matches!(c, Child::Element(e) if *e == id));
        }
        if self.root == Some(id) {
            self.root = None;
        }
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children.iter().filter_map(|c| match c {
                    Child::Element(e) => Some(*e),
                    Child::Text(_) => None,
                }));
                self.free_list.push(cur.idx());
                if self.focus == Some(cur) {
                    self.focus = None;
                }
            }
        }
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Local data of a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Update the border box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.bounds = bounds;
        }
    }

    /// Update own opacity.
    pub fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.opacity = opacity;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.z_index = z;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags = flags;
        }
    }

    /// Replace the viewport (for example after a window resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current scroll offset of the document.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    /// Scroll the document to an absolute offset.
    pub fn scroll_to(&mut self, offset: Vec2) {
        self.scroll = offset;
    }

    /// Scroll the document by a delta.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Move keyboard focus.
    pub fn set_focus(&mut self, id: Option<ElementId>) {
        self.focus = id.filter(|e| self.is_alive(*e));
    }

    /// Hit test a viewport-space point. Returns the topmost matching element.
    ///
    /// Points outside the viewport never hit anything.
    /// Elements hidden by their own or an inherited [`ElementFlags::VISIBLE`] are skipped
    /// along with their subtree; opacity does not affect hit testing.
    /// Among elements containing the point the highest z-index wins, with ties
    /// going to the element later in document order.
    pub fn hit_test_point(&self, pt: Point) -> Option<ElementId> {
        if !self.viewport.rect().contains(pt) {
            return None;
        }
        let mut best: Option<(ElementId, i32)> = None;
        let mut stack = Vec::from_iter(self.root);
        while let Some(id) = stack.pop() {
            let Some(node) = self.node_opt(id) else {
                continue;
            };
            if !node.local.flags.contains(ElementFlags::VISIBLE) {
                continue;
            }
            if self.viewport_rect(node).contains(pt) {
                match best {
                    Some((_, z_best)) if node.local.z_index < z_best => {}
                    _ => best = Some((id, node.local.z_index)),
                }
            }
            // Push in reverse so the pop order is document order.
            for child in node.children.iter().rev() {
                if let Child::Element(e) = child {
                    stack.push(*e);
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Path from the document element to `id` (inclusive).
    pub fn path_to_root(&self, mut id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        while let Some(node) = self.node_opt(id) {
            out.push(id);
            match node.parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    // --- internals ---

    fn viewport_rect(&self, node: &Node) -> Rect {
        if node.local.flags.contains(ElementFlags::FIXED) {
            node.local.bounds
        } else {
            node.local.bounds - self.scroll
        }
    }

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "ElementId uses 32-bit indices by design."
)]
fn slot_id(idx: usize, generation: u32) -> ElementId {
    ElementId::new(idx as u32, generation)
}

impl Page for DomTree {
    type Element = ElementId;

    fn root(&self) -> Option<ElementId> {
        self.root.filter(|r| self.is_alive(*r))
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node_opt(element)?.parent
    }

    fn child_nodes(&self, element: ElementId) -> impl Iterator<Item = ChildNode<'_, ElementId>> + '_ {
        self.node_opt(element)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .map(|c| match c {
                Child::Element(e) => ChildNode::Element(*e),
                Child::Text(t) => ChildNode::Text(t.as_str()),
            })
    }

    fn style(&self, element: ElementId) -> ComputedStyle {
        let Some(node) = self.node_opt(element) else {
            return ComputedStyle::default();
        };
        // Visibility inherits; opacity does not.
        let hidden = self
            .path_to_root(element)
            .iter()
            .any(|e| !self.node(*e).local.flags.contains(ElementFlags::VISIBLE));
        ComputedStyle {
            opacity: node.local.opacity,
            visibility: if hidden {
                Visibility::Hidden
            } else {
                Visibility::Visible
            },
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.node_opt(element)
            .map(|n| self.viewport_rect(n))
            .unwrap_or(Rect::ZERO)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_from_point(&self, pt: Point) -> Option<ElementId> {
        self.hit_test_point(pt)
    }

    fn is_text_input(&self, element: ElementId) -> bool {
        self.node_opt(element)
            .is_some_and(|n| n.local.flags.contains(ElementFlags::EDITABLE))
    }

    fn focused(&self) -> Option<ElementId> {
        self.focus.filter(|f| self.is_alive(*f))
    }
}
