//! Result aggregation: batch merging and deterministic ordering.
//!
//! Ordering is always computed in two steps: a stable sort with the key's
//! default comparator, then a reversal of the whole sequence when the
//! direction is ascending. Items that tie on the key fall back to arrival
//! order, so under `Asc` tied items show up in reverse arrival order.

use std::cmp::Ordering;

use crate::{ResultItem, SortDirection, SortKey, SortSpec};

/// A result item tagged with the position at which it arrived from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    arrival: u64,
    item: ResultItem,
}

impl ResultEntry {
    pub fn new(arrival: u64, item: ResultItem) -> Self {
        Self { arrival, item }
    }

    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    pub fn item(&self) -> &ResultItem {
        &self.item
    }
}

/// Sorts entries by `spec`: default comparator first, then reverse for `Asc`.
pub fn sort_entries(entries: &mut [ResultEntry], spec: SortSpec) {
    entries.sort_by(|a, b| default_order(spec.key, a, b));
    if spec.direction == SortDirection::Asc {
        entries.reverse();
    }
}

fn default_order(key: SortKey, a: &ResultEntry, b: &ResultEntry) -> Ordering {
    let primary = match key {
        SortKey::Relevance => b.item.relevance_score.total_cmp(&a.item.relevance_score),
        SortKey::SentimentScore => b.item.sentiment_score.total_cmp(&a.item.sentiment_score),
        SortKey::SentimentLabel => label_order(&a.item.sentiment_label, &b.item.sentiment_label),
    };
    primary.then_with(|| a.arrival.cmp(&b.arrival))
}

/// Case-insensitive label order; labels differing only in case put lowercase first.
fn label_order(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

/// The ordered result list shown to the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    entries: Vec<ResultEntry>,
    next_arrival: u64,
}

impl ResultSet {
    /// Builds a fresh set from one batch, discarding any previous ordering state.
    pub fn from_batch(batch: Vec<ResultItem>, spec: SortSpec) -> Self {
        let mut set = Self::default();
        set.append_batch(batch, spec);
        set
    }

    /// Appends a batch after the existing entries and re-sorts the whole set.
    pub fn append_batch(&mut self, batch: Vec<ResultItem>, spec: SortSpec) {
        self.entries.reserve(batch.len());
        for item in batch {
            self.entries.push(ResultEntry::new(self.next_arrival, item));
            self.next_arrival += 1;
        }
        sort_entries(&mut self.entries, spec);
    }

    pub fn resort(&mut self, spec: SortSpec) {
        sort_entries(&mut self.entries, spec);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultItem> + '_ {
        self.entries.iter().map(ResultEntry::item)
    }

    pub fn to_items(&self) -> Vec<ResultItem> {
        self.iter().cloned().collect()
    }
}
