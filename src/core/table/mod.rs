//! Typed columnar table: dense per-column storage addressed by logical row
//! id, a tombstone set for deletion, and per-column secondary indexes.
//!
//! The table owns no lock. Callers (the catalog facade) hold the per-table
//! mutex for the full duration of every operation, and the mutation paths
//! inline predicate resolution via [`Table::resolve`] instead of re-entering
//! public entry points, so a plain mutex suffices.
//!
//! Index maintenance contract: every mutation of a row (insert, per-column
//! update, delete) leaves the indexes exactly covering the live rows before
//! control returns to the caller. The executor assumes this.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::core::common::errors::{MemDbError, Result};
use crate::core::common::types::{Row, RowId, Schema, Value};
use crate::core::indexing::{self, Index, IndexKind};
use crate::core::query::clause::{Filter, Operator};

pub struct Table {
    name: String,
    schema: Schema,
    /// One dense value vector per schema column; slot for row `r` is `r - 1`.
    columns: Vec<Vec<Value>>,
    /// Largest row id ever assigned; equals every column's length.
    high_water: RowId,
    /// Row ids logically deleted. Their slots are never reclaimed.
    tombstones: HashSet<RowId>,
    /// Secondary indexes keyed by column name.
    indexes: HashMap<String, Box<dyn Index>>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("high_water", &self.high_water)
            .field("tombstones", &self.tombstones.len())
            .field("indexes", &self.indexes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema, capacity_hint: usize) -> Self {
        let columns = schema
            .columns()
            .iter()
            .map(|_| Vec::with_capacity(capacity_hint))
            .collect();
        Self {
            name: name.into(),
            schema,
            columns,
            high_water: 0,
            tombstones: HashSet::new(),
            indexes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Largest row id ever assigned.
    pub fn high_water(&self) -> RowId {
        self.high_water
    }

    /// Number of live (not tombstoned) rows.
    pub fn live_count(&self) -> u64 {
        self.high_water - self.tombstones.len() as u64
    }

    pub fn is_live(&self, id: RowId) -> bool {
        id >= 1 && id <= self.high_water && !self.tombstones.contains(&id)
    }

    /// Live row ids in ascending order.
    pub fn live_row_ids(&self) -> Vec<RowId> {
        (1..=self.high_water).filter(|id| !self.tombstones.contains(id)).collect()
    }

    pub(crate) fn value_at(&self, column_idx: usize, id: RowId) -> &Value {
        &self.columns[column_idx][(id - 1) as usize]
    }

    pub fn index_kind(&self, column: &str) -> Option<IndexKind> {
        self.indexes.get(column).map(|index| index.kind())
    }

    /// Inserts one row and returns the new high-water mark (the assigned id).
    ///
    /// Missing columns default to null; keys not in the schema are ignored.
    /// The whole row is validated before any column is touched, so a failed
    /// insert consumes no row id.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::SchemaMismatch` when a non-null value's tag does
    /// not match its declared column type.
    pub fn insert(&mut self, row: &Row) -> Result<RowId> {
        let values = self.effective_values(row)?;
        let id = self.append_row(values);
        trace!(table = %self.name, row_id = id, "inserted row");
        Ok(id)
    }

    /// Inserts rows under a single caller-held lock acquisition, pre-sizing
    /// the columns. Validation happens per row inside the loop: a failure
    /// mid-batch leaves the previously inserted rows of the same batch in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::SchemaMismatch` on the first row that fails
    /// validation.
    pub fn insert_batch(&mut self, rows: &[Row]) -> Result<Vec<RowId>> {
        for column in &mut self.columns {
            column.reserve(rows.len());
        }
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let values = self.effective_values(row)?;
            ids.push(self.append_row(values));
        }
        trace!(table = %self.name, count = ids.len(), "inserted batch");
        Ok(ids)
    }

    /// Applies `updates` to every live row matched by `filters` (all live
    /// rows when empty) and returns the count of updated rows.
    ///
    /// Update keys not in the schema are ignored. Known keys are validated
    /// against the declared types before any state changes. Only the named
    /// columns have their index entries touched.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::SchemaMismatch` on a mismatched non-null value,
    /// or any error from predicate resolution.
    pub fn update(&mut self, updates: &Row, filters: &[Filter]) -> Result<u64> {
        let filter_refs: Vec<&Filter> = filters.iter().collect();
        let ids = self.resolve(&filter_refs)?;

        let mut changes: Vec<(usize, String, Value)> = Vec::new();
        for (name, value) in updates.iter() {
            let Some(idx) = self.schema.get_column_index(name) else {
                continue;
            };
            let declared = self.schema.columns()[idx].data_type;
            if !value.conforms_to(declared) {
                return Err(MemDbError::SchemaMismatch(format!(
                    "column '{}' of table '{}' holds {}, got {}",
                    name,
                    self.name,
                    declared,
                    value.data_type()
                )));
            }
            changes.push((idx, name.clone(), value.clone()));
        }

        let mut count = 0_u64;
        for id in ids {
            let slot = (id - 1) as usize;
            for (idx, name, new_value) in &changes {
                let old_value = self.columns[*idx][slot].clone();
                if let Some(index) = self.indexes.get_mut(name) {
                    index.remove(&old_value, id);
                }
                self.columns[*idx][slot] = new_value.clone();
                if let Some(index) = self.indexes.get_mut(name) {
                    index.add(new_value.clone(), id);
                }
            }
            count += 1;
        }
        trace!(table = %self.name, count, "updated rows");
        Ok(count)
    }

    /// Tombstones every live row matched by `filters` (all live rows when
    /// empty) and returns the count. Matched rows are removed from every
    /// index bucket derived from their current column values.
    ///
    /// # Errors
    ///
    /// Propagates predicate-resolution errors.
    pub fn delete(&mut self, filters: &[Filter]) -> Result<u64> {
        let filter_refs: Vec<&Filter> = filters.iter().collect();
        let ids = self.resolve(&filter_refs)?;

        let mut count = 0_u64;
        for id in ids {
            let slot = (id - 1) as usize;
            for (idx, col) in self.schema.columns().iter().enumerate() {
                if let Some(index) = self.indexes.get_mut(&col.name) {
                    index.remove(&self.columns[idx][slot], id);
                }
            }
            self.tombstones.insert(id);
            count += 1;
        }
        trace!(table = %self.name, count, "deleted rows");
        Ok(count)
    }

    /// Creates an index of `kind` on `column`, populated from the current
    /// live rows. Runs entirely inside the caller-held critical section.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` for an unknown column and
    /// `MemDbError::AlreadyExists` when the column is already indexed.
    pub fn create_index(&mut self, column: &str, kind: IndexKind) -> Result<()> {
        let idx = self.schema.get_column_index(column).ok_or_else(|| {
            MemDbError::NotFound(format!("column '{}' in table '{}'", column, self.name))
        })?;
        if self.indexes.contains_key(column) {
            return Err(MemDbError::AlreadyExists(format!(
                "index on column '{}' of table '{}'",
                column, self.name
            )));
        }
        let mut index = indexing::new_index(kind);
        for id in self.live_row_ids() {
            index.add(self.columns[idx][(id - 1) as usize].clone(), id);
        }
        self.indexes.insert(column.to_string(), index);
        debug!(table = %self.name, column, ?kind, "created index");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when the column carries no index.
    pub fn drop_index(&mut self, column: &str) -> Result<()> {
        if self.indexes.remove(column).is_none() {
            return Err(MemDbError::NotFound(format!(
                "index on column '{}' of table '{}'",
                column, self.name
            )));
        }
        debug!(table = %self.name, column, "dropped index");
        Ok(())
    }

    /// Resolves a conjunction of filters to the matching live row ids, in
    /// ascending order. This is the shared predicate path of select, update,
    /// and delete.
    ///
    /// Every clause is validated up front — unknown columns and tag
    /// mismatches fail here — so the indexed and scanned paths agree on
    /// every table state, including the empty one. An index on the filtered
    /// column serves the `==` operator via bucket lookup; every other case
    /// linearly scans the surviving set.
    ///
    /// # Errors
    ///
    /// `MemDbError::NotFound` for a filter on an unknown column;
    /// `MemDbError::TypeError` for a non-null filter value whose tag differs
    /// from the declared column type.
    pub(crate) fn resolve(&self, filters: &[&Filter]) -> Result<Vec<RowId>> {
        let mut column_indices = Vec::with_capacity(filters.len());
        for filter in filters {
            let idx = self.schema.get_column_index(&filter.column).ok_or_else(|| {
                MemDbError::NotFound(format!(
                    "column '{}' in table '{}'",
                    filter.column, self.name
                ))
            })?;
            let declared = self.schema.columns()[idx].data_type;
            if !filter.value.is_null() && filter.value.data_type() != declared {
                return Err(MemDbError::TypeError(format!(
                    "cannot compare {} column '{}' with {}",
                    declared,
                    filter.column,
                    filter.value.data_type()
                )));
            }
            column_indices.push(idx);
        }

        let mut ids = self.live_row_ids();
        for (filter, idx) in filters.iter().zip(column_indices) {
            if ids.is_empty() {
                break;
            }
            if filter.operator == Operator::Eq {
                if let Some(index) = self.indexes.get(&filter.column) {
                    let bucket: HashSet<RowId> = index
                        .lookup_eq(&filter.value)
                        .map(|ids| ids.iter().copied().collect())
                        .unwrap_or_default();
                    ids.retain(|id| bucket.contains(id));
                    continue;
                }
            }
            let column = &self.columns[idx];
            let mut kept = Vec::with_capacity(ids.len());
            for id in ids {
                let ordering = column[(id - 1) as usize].try_compare(&filter.value)?;
                if filter.operator.matches(ordering) {
                    kept.push(id);
                }
            }
            ids = kept;
        }
        Ok(ids)
    }

    /// Validates a row against the schema and returns the effective value
    /// per declared column (missing columns default to null).
    fn effective_values(&self, row: &Row) -> Result<Vec<Value>> {
        self.schema
            .columns()
            .iter()
            .map(|col| {
                let value = row.get(&col.name).cloned().unwrap_or(Value::Null);
                if !value.conforms_to(col.data_type) {
                    return Err(MemDbError::SchemaMismatch(format!(
                        "column '{}' of table '{}' holds {}, got {}",
                        col.name,
                        self.name,
                        col.data_type,
                        value.data_type()
                    )));
                }
                Ok(value)
            })
            .collect()
    }

    /// Assigns the next row id, appends the validated values, and indexes
    /// them. The effective (possibly null) value of every indexed column
    /// receives an entry, so index coverage of live rows stays exact.
    fn append_row(&mut self, values: Vec<Value>) -> RowId {
        self.high_water += 1;
        let id = self.high_water;
        for (idx, value) in values.into_iter().enumerate() {
            if let Some(index) = self.indexes.get_mut(&self.schema.columns()[idx].name) {
                index.add(value.clone(), id);
            }
            self.columns[idx].push(value);
        }
        id
    }

    /// Asserts the structural invariants: column widths equal the high-water
    /// mark, tombstones stay in range, and every index exactly covers the
    /// live rows (right bucket, exactly once, no empty buckets).
    #[cfg(test)]
    pub(crate) fn check_integrity(&self) {
        for (idx, col) in self.schema.columns().iter().enumerate() {
            assert_eq!(
                self.columns[idx].len() as u64,
                self.high_water,
                "column '{}' width must equal the high-water mark",
                col.name
            );
        }
        for id in &self.tombstones {
            assert!(*id >= 1 && *id <= self.high_water, "tombstone {} out of range", id);
        }
        for (name, index) in &self.indexes {
            let cidx = self
                .schema
                .get_column_index(name)
                .unwrap_or_else(|| panic!("indexed column '{}' missing from schema", name));
            let mut seen: HashMap<RowId, usize> = HashMap::new();
            for (value, bucket) in index.entries() {
                assert!(!bucket.is_empty(), "index '{}' holds an empty bucket", name);
                for id in bucket {
                    assert!(self.is_live(*id), "index '{}' references dead row {}", name, id);
                    assert_eq!(
                        &self.columns[cidx][(*id - 1) as usize],
                        value,
                        "index '{}' bucket key diverges from column data for row {}",
                        name,
                        id
                    );
                    *seen.entry(*id).or_insert(0) += 1;
                }
            }
            for id in self.live_row_ids() {
                assert_eq!(
                    seen.get(&id).copied().unwrap_or(0),
                    1,
                    "live row {} must appear exactly once in index '{}'",
                    id,
                    name
                );
            }
        }
    }
}
