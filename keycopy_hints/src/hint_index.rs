// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visible hint set: label lookup, prefix matching, and paint order.
//!
//! Built once whenever the visible window changes. Labels map to candidates
//! through an ordered map (so a prefix query is a single range scan), and
//! candidates map back to their labels through the forest, which makes the
//! mapping bidirectional without a reverse search per painted hint.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Bound;

use crate::forest::CandidateForest;
use crate::types::CandidateId;

/// Result of matching a typed prefix against the visible labels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Matches {
    /// No visible label starts with the prefix.
    Empty,
    /// Exactly one visible label starts with the prefix.
    Unique(CandidateId),
    /// This many visible labels start with the prefix.
    Several(usize),
}

/// Label ↔ candidate mapping for the visible window.
#[derive(Clone, Debug, Default)]
pub struct HintIndex {
    by_label: BTreeMap<String, CandidateId>,
    paint_order: Vec<CandidateId>,
}

impl HintIndex {
    /// Index the candidates `visible` of `forest`.
    pub fn build<E: Copy>(
        forest: &CandidateForest<E>,
        visible: impl IntoIterator<Item = CandidateId>,
    ) -> Self {
        let mut by_label = BTreeMap::new();
        let mut paint_order = Vec::new();
        for id in visible {
            if let Some(c) = forest.get(id) {
                by_label.insert(c.label.clone(), id);
                paint_order.push(id);
            }
        }
        // Outer layers first so nested hints end up on top; stable for equal layers.
        paint_order.sort_by_key(|id| {
            core::cmp::Reverse(forest.get(*id).map_or(0, |c| c.layer))
        });
        Self {
            by_label,
            paint_order,
        }
    }

    /// Number of visible hints.
    pub fn len(&self) -> usize {
        self.paint_order.len()
    }

    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.paint_order.is_empty()
    }

    /// The candidate carrying `label`, if visible.
    pub fn get(&self, label: &str) -> Option<CandidateId> {
        self.by_label.get(label).copied()
    }

    /// Whether `id` is in the visible window.
    pub fn contains(&self, id: CandidateId) -> bool {
        self.paint_order.contains(&id)
    }

    /// Visible candidates in paint order: descending layer, then document order.
    pub fn paint_order(&self) -> &[CandidateId] {
        &self.paint_order
    }

    /// Visible `(label, candidate)` pairs whose label starts with `prefix`, in label order.
    pub fn matching<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, CandidateId)> + 'a {
        self.by_label
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(label, _)| label.starts_with(prefix))
            .map(|(label, id)| (label.as_str(), *id))
    }

    /// Classify how many visible labels start with `prefix`.
    pub fn matches(&self, prefix: &str) -> Matches {
        let mut it = self.matching(prefix);
        match (it.next(), it.next()) {
            (None, _) => Matches::Empty,
            (Some((_, id)), None) => Matches::Unique(id),
            (Some(_), Some(_)) => Matches::Several(2 + it.count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{Alphabet, assign_labels};
    use crate::layers::assign_layers;
    use alloc::vec;
    use kurbo::Rect;

    fn flat(n: usize) -> CandidateForest<usize> {
        let mut f = CandidateForest::default();
        for i in 0..n {
            f.push(i, None, Rect::ZERO);
        }
        let _ = assign_layers(&mut f);
        assign_labels(&mut f, &Alphabet::digits());
        f
    }

    #[test]
    fn prefix_classification() {
        let f = flat(25);
        let index = HintIndex::build(&f, f.iter().map(|(id, _)| id));
        assert_eq!(index.matches(""), Matches::Several(25));
        assert_eq!(index.matches("1"), Matches::Several(10));
        assert_eq!(index.matches("2"), Matches::Several(5));
        assert_eq!(index.matches("24"), Matches::Unique(CandidateId::new(24)));
        assert_eq!(index.matches("3"), Matches::Empty);
        assert_eq!(index.matches("25"), Matches::Empty);
        assert_eq!(index.get("07"), Some(CandidateId::new(7)));
    }

    #[test]
    fn narrowing_is_monotonic() {
        let f = flat(137);
        let index = HintIndex::build(&f, f.iter().map(|(id, _)| id));
        for p in ["", "0", "1", "13", "136", "2"] {
            let outer: Vec<_> = index.matching(p).map(|(_, id)| id).collect();
            for c in '0'..='9' {
                let mut longer = String::from(p);
                longer.push(c);
                for (_, id) in index.matching(&longer) {
                    assert!(outer.contains(&id), "{longer} matched outside {p}");
                }
            }
        }
    }

    #[test]
    fn paint_order_puts_outer_layers_first() {
        let mut f = CandidateForest::default();
        let outer = f.push(0_usize, None, Rect::ZERO);
        let inner = f.push(1, Some(outer), Rect::ZERO);
        let lone = f.push(2, None, Rect::ZERO);
        let _ = assign_layers(&mut f);
        assign_labels(&mut f, &Alphabet::digits());
        let index = HintIndex::build(&f, [inner, lone, outer]);
        assert_eq!(index.paint_order(), &[outer, inner, lone]);
        assert!(index.contains(lone));
        assert_eq!(index.len(), 3);

        let window = HintIndex::build(&f, [outer]);
        assert_eq!(window.matches("1"), Matches::Empty);
        assert_eq!(window.matches("0"), Matches::Unique(outer));
        assert_eq!(vec![outer], window.paint_order());
    }
}
