//! Cross-result highlight index.
//!
//! Two span pairs in different results carry the same colour seed exactly
//! when they matched the same normalized phrase. [`HighlightIndex`] groups
//! the pairs of a materialized batch by seed so a UI can light up every
//! occurrence of a phrase at once. It is derived data: rebuild it whenever
//! the batch changes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::AlignError;
use crate::result::AlignmentResult;

/// One span pair inside a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanRef {
    pub result_index: usize,
    pub span_pair_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightIndex {
    by_seed: BTreeMap<String, Vec<SpanRef>>,
    seeds: HashMap<SpanRef, String>,
}

impl HighlightIndex {
    pub fn from_results(results: &[AlignmentResult]) -> Self {
        let mut index = Self::default();
        for (result_index, result) in results.iter().enumerate() {
            index.insert(result_index, result);
        }
        index
    }

    /// Index a batch whose slots may hold errors. Failed slots are skipped
    /// but keep their position, so `result_index` still matches the batch.
    pub fn from_slots(slots: &[Result<AlignmentResult, AlignError>]) -> Self {
        let mut index = Self::default();
        for (result_index, slot) in slots.iter().enumerate() {
            if let Ok(result) = slot {
                index.insert(result_index, result);
            }
        }
        index
    }

    fn insert(&mut self, result_index: usize, result: &AlignmentResult) {
        for pair in &result.pairs {
            let span_ref = SpanRef {
                result_index,
                span_pair_id: pair.id,
            };
            self.by_seed
                .entry(pair.color_seed.clone())
                .or_default()
                .push(span_ref);
            self.seeds.insert(span_ref, pair.color_seed.clone());
        }
    }

    /// Every span pair with this seed, ordered by result then id.
    pub fn references(&self, seed: &str) -> &[SpanRef] {
        self.by_seed.get(seed).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn seed_of(&self, result_index: usize, span_pair_id: u32) -> Option<&str> {
        self.seeds
            .get(&SpanRef {
                result_index,
                span_pair_id,
            })
            .map(String::as_str)
    }

    /// Other span pairs that matched the same phrase as the given one.
    pub fn correlated(&self, result_index: usize, span_pair_id: u32) -> Vec<SpanRef> {
        let this = SpanRef {
            result_index,
            span_pair_id,
        };
        match self.seeds.get(&this) {
            Some(seed) => self
                .references(seed)
                .iter()
                .copied()
                .filter(|r| *r != this)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Seeds shared by more than one span pair.
    pub fn shared_seeds(&self) -> impl Iterator<Item = &str> {
        self.by_seed
            .iter()
            .filter(|(_, refs)| refs.len() > 1)
            .map(|(seed, _)| seed.as_str())
    }

    /// Number of distinct seeds.
    pub fn len(&self) -> usize {
        self.by_seed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seed.is_empty()
    }
}
