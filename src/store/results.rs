//! Append-only multimap from output name to index-ordered key point values.

use crate::signal::KeyPointValue;
use std::collections::HashMap;

/// The growing collection of produced KPVs for one run.
///
/// Records under one name are kept ordered by time index. Append-only for
/// the duration of a run; never mutated after insertion. Discarded with the
/// run on a fatal error, so consumers only ever see a complete set.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    by_name: HashMap<String, Vec<KeyPointValue>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one record, keeping the name's collection index-ordered.
    pub fn append(&mut self, kpv: KeyPointValue) {
        let records = self.by_name.entry(kpv.name.clone()).or_default();
        let pos = records.partition_point(|r| r.index <= kpv.index);
        records.insert(pos, kpv);
    }

    pub fn extend(&mut self, kpvs: impl IntoIterator<Item = KeyPointValue>) {
        for kpv in kpvs {
            self.append(kpv);
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All records under `name`, in time order.
    pub fn get_all(&self, name: &str) -> &[KeyPointValue] {
        self.by_name.get(name).map_or(&[], Vec::as_slice)
    }

    /// The single record with the greatest value under `name`. Value ties
    /// resolve to the earliest index.
    pub fn get_max(&self, name: &str) -> Option<&KeyPointValue> {
        self.get_all(name)
            .iter()
            .reduce(|best, r| if r.value > best.value { r } else { best })
    }

    /// The single record with the least value under `name`. Value ties
    /// resolve to the earliest index.
    pub fn get_min(&self, name: &str) -> Option<&KeyPointValue> {
        self.get_all(name)
            .iter()
            .reduce(|best, r| if r.value < best.value { r } else { best })
    }

    /// The record under `name` closest in time to `index`. Ties resolve to
    /// the earlier record.
    pub fn nearest(&self, name: &str, index: f64) -> Option<&KeyPointValue> {
        self.get_all(name).iter().min_by(|a, b| {
            (a.index - index)
                .abs()
                .total_cmp(&(b.index - index).abs())
                .then(a.index.total_cmp(&b.index))
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// The full ordered `(name, index, value)` table handed to the
    /// reporting collaborator at run end.
    pub fn into_table(self) -> Vec<KeyPointValue> {
        let mut all: Vec<KeyPointValue> = self.by_name.into_values().flatten().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.index.total_cmp(&b.index)));
        all
    }
}
