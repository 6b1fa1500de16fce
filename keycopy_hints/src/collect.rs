// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate collection.
//!
//! ## Overview
//!
//! One depth-first pass over the whole element tree. Each element is tested
//! against the mode's qualification predicate and then (only if it qualifies)
//! against the [visibility oracle](crate::is_visible). Survivors become
//! candidates linked to the nearest candidate on their ancestor path; elements
//! that fail are transparent and the walk continues into their children.
//!
//! The walk uses an explicit stack whose entries carry their own nearest
//! candidate ancestor, so there is no shared ancestor stack to keep in sync.

use alloc::vec::Vec;

use keycopy_dom::{ChildNode, Page};
use tracing::trace;

use crate::error::HintError;
use crate::forest::CandidateForest;
use crate::types::{CandidateId, Mode};
use crate::visibility::is_visible;

/// Collect the visible candidates of `page` for `mode`.
///
/// `excluded` (typically the overlay container) never becomes a candidate.
/// Returns [`HintError::NoCandidates`] when nothing qualifies.
pub fn collect<P: Page>(
    page: &P,
    mode: Mode,
    excluded: Option<P::Element>,
) -> Result<CandidateForest<P::Element>, HintError> {
    let mut forest = CandidateForest::default();
    let mut stack: Vec<(P::Element, Option<CandidateId>)> =
        page.root().map(|r| (r, None)).into_iter().collect();
    let mut visited = 0_usize;

    while let Some((element, ancestor)) = stack.pop() {
        visited += 1;
        let nearest = if Some(element) != excluded
            && qualifies(page, element, mode)
            && is_visible(page, element)
        {
            Some(forest.push(element, ancestor, page.bounding_rect(element)))
        } else {
            ancestor
        };
        let start = stack.len();
        stack.extend(page.children(element).map(|c| (c, nearest)));
        stack[start..].reverse();
    }

    trace!(visited, candidates = forest.len(), ?mode, "page scanned");
    if forest.is_empty() {
        Err(HintError::NoCandidates)
    } else {
        Ok(forest)
    }
}

/// The per-mode qualification predicate, ignoring visibility.
pub fn qualifies<P: Page>(page: &P, element: P::Element, mode: Mode) -> bool {
    match mode {
        Mode::DirectText => page
            .child_nodes(element)
            .filter_map(ChildNode::text)
            .any(not_blank),
        Mode::AllText => has_text(page, element),
    }
}

/// Whether any text node under `element` has non-whitespace content.
///
/// Equivalent to `!text_content(element).trim().is_empty()` without building the string.
fn has_text<P: Page>(page: &P, element: P::Element) -> bool {
    let mut stack = Vec::from([element]);
    while let Some(e) = stack.pop() {
        for node in page.child_nodes(e) {
            match node {
                ChildNode::Text(t) if not_blank(t) => return true,
                ChildNode::Text(_) => {}
                ChildNode::Element(child) => stack.push(child),
            }
        }
    }
    false
}

fn not_blank(text: &str) -> bool {
    !text.trim().is_empty()
}
