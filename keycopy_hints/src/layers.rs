// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer assignment.
//!
//! A candidate's layer is `1` when it has no candidate children and otherwise
//! one more than the highest layer among its children. Layer 1 is therefore the
//! innermost clutter, and higher layers are progressively outer containers.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::forest::CandidateForest;
use crate::types::CandidateId;

/// All candidates sharing one layer number, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    number: u32,
    members: Vec<CandidateId>,
}

impl Layer {
    /// The layer number (`1` = leaves).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Member candidates in document order.
    pub fn members(&self) -> &[CandidateId] {
        &self.members
    }
}

/// Layers sorted by ascending layer number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerIndex {
    layers: Vec<Layer>,
}

impl LayerIndex {
    /// Number of distinct layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers (only for an empty forest).
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The layer at `index` (`0` is the innermost).
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Iterate the layers, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    /// Every candidate in the layers from `start` to the last: the visible window.
    pub fn window(&self, start: usize) -> impl Iterator<Item = CandidateId> + '_ {
        self.layers
            .get(start..)
            .unwrap_or_default()
            .iter()
            .flat_map(|l| l.members.iter().copied())
    }
}

/// Compute every candidate's layer and group candidates by it.
pub fn assign_layers<E: Copy>(forest: &mut CandidateForest<E>) -> LayerIndex {
    let candidates = forest.candidates_mut();
    // Children always follow their parent in document order.
    for i in (0..candidates.len()).rev() {
        let layer = candidates[i]
            .children
            .iter()
            .map(|c| candidates[c.index()].layer)
            .max()
            .map_or(1, |deepest| deepest + 1);
        candidates[i].layer = layer;
    }

    let mut groups: BTreeMap<u32, Vec<CandidateId>> = BTreeMap::new();
    for (id, candidate) in forest.iter() {
        groups.entry(candidate.layer).or_default().push(id);
    }
    LayerIndex {
        layers: groups
            .into_iter()
            .map(|(number, members)| Layer { number, members })
            .collect(),
    }
}
