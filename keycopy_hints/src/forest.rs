// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The candidate arena for one activation.
//!
//! Page elements are held only as opaque keys. Everything the engine derives
//! about them (nesting, layer, label, color, geometry) lives here, so nothing is
//! ever written back onto the page.

use alloc::string::String;
use alloc::vec::Vec;

use keycopy_dom::Page;
use kurbo::Rect;

use crate::types::{CandidateId, Hsla};

/// A hintable element and the data derived for it.
#[derive(Clone, Debug)]
pub struct Candidate<E> {
    pub(crate) element: E,
    pub(crate) parent: Option<CandidateId>,
    pub(crate) children: Vec<CandidateId>,
    pub(crate) layer: u32,
    pub(crate) label: String,
    pub(crate) color: Hsla,
    pub(crate) bounds: Rect,
}

impl<E: Copy> Candidate<E> {
    /// The page element.
    pub fn element(&self) -> E {
        self.element
    }

    /// Nearest ancestor that is also a candidate.
    pub fn parent(&self) -> Option<CandidateId> {
        self.parent
    }

    /// Candidate children in document order.
    pub fn children(&self) -> &[CandidateId] {
        &self.children
    }

    /// Layer number: `1` for leaves, otherwise one more than the deepest child.
    ///
    /// `0` until [`assign_layers`](crate::assign_layers) runs.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Hint label. Empty until [`assign_labels`](crate::assign_labels) runs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fill color.
    pub fn color(&self) -> Hsla {
        self.color
    }

    /// Viewport-space bounds as of the last scan or refresh.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// All candidates of one activation, in document (pre-)order.
///
/// Every parent precedes its children, so a reverse walk visits children before parents.
#[derive(Clone, Debug)]
pub struct CandidateForest<E> {
    candidates: Vec<Candidate<E>>,
}

impl<E> Default for CandidateForest<E> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<E: Copy> CandidateForest<E> {
    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the forest has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Look up a candidate.
    pub fn get(&self, id: CandidateId) -> Option<&Candidate<E>> {
        self.candidates.get(id.index())
    }

    /// Candidates with their ids, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Candidate<E>)> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (CandidateId::new(i), c))
    }

    /// Candidates without a candidate ancestor.
    pub fn roots(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.iter()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(id, _)| id)
    }

    /// The candidate wrapping `element`, if any.
    pub fn find(&self, element: E) -> Option<CandidateId>
    where
        E: PartialEq,
    {
        self.candidates
            .iter()
            .position(|c| c.element == element)
            .map(CandidateId::new)
    }

    /// Re-read the bounds of `ids` from the page.
    pub fn refresh_bounds<P>(&mut self, page: &P, ids: impl IntoIterator<Item = CandidateId>)
    where
        P: Page<Element = E>,
    {
        for id in ids {
            if let Some(c) = self.candidates.get_mut(id.index()) {
                c.bounds = page.bounding_rect(c.element);
            }
        }
    }

    /// Append a candidate under `parent` and return its id.
    pub(crate) fn push(&mut self, element: E, parent: Option<CandidateId>, bounds: Rect) -> CandidateId {
        let id = CandidateId::new(self.candidates.len());
        self.candidates.push(Candidate {
            element,
            parent,
            children: Vec::new(),
            layer: 0,
            label: String::new(),
            color: Hsla::BLACK,
            bounds,
        });
        if let Some(p) = parent.and_then(|p| self.candidates.get_mut(p.index())) {
            p.children.push(id);
        }
        id
    }

    pub(crate) fn candidates_mut(&mut self) -> &mut [Candidate<E>] {
        &mut self.candidates
    }
}
