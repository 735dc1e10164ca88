use std::collections::BTreeMap;

use super::traits::{Index, IndexKind};
use crate::core::common::types::{RowId, Value};

/// Ordered index: the same bucket discipline as the equality index, but the
/// key-level map iterates in ascending value order. The executor currently
/// uses it for point lookups only; ordered iteration is exposed through
/// `entries` for callers that want it.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    store: BTreeMap<Value, Vec<RowId>>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Index for OrderedIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Ordered
    }

    fn add(&mut self, value: Value, row_id: RowId) {
        self.store.entry(value).or_default().push(row_id);
    }

    fn remove(&mut self, value: &Value, row_id: RowId) {
        if let Some(bucket) = self.store.get_mut(value) {
            if let Some(pos) = bucket.iter().position(|id| *id == row_id) {
                bucket.remove(pos);
            }
            if bucket.is_empty() {
                self.store.remove(value);
            }
        }
    }

    fn lookup_eq(&self, value: &Value) -> Option<&[RowId]> {
        self.store.get(value).map(Vec::as_slice)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&Value, &[RowId])> + '_> {
        Box::new(self.store.iter().map(|(value, bucket)| (value, bucket.as_slice())))
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
