use std::fmt::Debug;

use crate::core::common::types::{RowId, Value};

/// The two index variants a column may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IndexKind {
    /// Point-equality lookups only; no key order.
    Equality,
    /// Same surface, but key iteration follows the total value order.
    Ordered,
}

/// A mapping from value to the ordered bucket of live row ids holding that
/// value in the indexed column.
///
/// Index operations are pure data-structure updates invoked only by the table
/// under its own lock, so the surface is infallible. The table is responsible
/// for keeping entries in step with column data: a bucket is never empty, a
/// live row appears exactly once in the bucket for its current value, and
/// tombstoned rows appear nowhere.
pub trait Index: Debug + Send {
    fn kind(&self) -> IndexKind;

    /// Appends `row_id` to the bucket for `value`, creating the bucket if
    /// needed.
    fn add(&mut self, value: Value, row_id: RowId);

    /// Removes the first occurrence of `row_id` from the bucket for `value`;
    /// a bucket left empty is dropped along with its key.
    fn remove(&mut self, value: &Value, row_id: RowId);

    /// Point-equality lookup. `None` when the value is not indexed.
    fn lookup_eq(&self, value: &Value) -> Option<&[RowId]>;

    /// Full key iteration; the ordered variant yields keys in ascending value
    /// order, the equality variant in no particular order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&Value, &[RowId])> + '_>;

    /// Number of distinct indexed values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
