//! Public API: [`Database`] is the named catalog facade, [`TableHandle`] the
//! per-table entry point.
//!
//! Every `TableHandle` operation acquires the table's mutex for its full
//! duration (seed, filter, sort, project, mutate — whatever applies), so
//! readers and writers serialize per table while different tables proceed in
//! parallel. Catalog operations touch only the table-name map and release
//! that lock before any table lock is taken.

use std::sync::{Arc, Mutex, PoisonError};

use crate::core::catalog::Catalog;
use crate::core::common::errors::Result;
use crate::core::common::types::{Row, RowId, Schema};
use crate::core::config::Config;
use crate::core::indexing::IndexKind;
use crate::core::query::clause::{Filter, Query};
use crate::core::query::executor;
use crate::core::table::Table;

/// A named, thread-safe container of tables. Cheap to share: all methods
/// take `&self`, so an `Arc<Database>` (or a reference) can serve any number
/// of threads.
#[derive(Debug)]
pub struct Database {
    name: String,
    config: Config,
    catalog: Catalog,
}

impl Database {
    /// Creates an empty database with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, Config::default())
    }

    /// Creates an empty database with the given tuning knobs.
    pub fn with_config(name: impl Into<String>, config: Config) -> Self {
        Self { name: name.into(), config, catalog: Catalog::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates an empty table under `name` with the given schema.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::AlreadyExists` when the name is taken.
    pub fn create_table(&self, name: &str, schema: Schema) -> Result<TableHandle> {
        let table = self.catalog.create_table(name, schema, self.config.initial_row_capacity)?;
        Ok(TableHandle { table })
    }

    /// Drops a table, releasing its columns and indexes.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when no such table exists.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        self.catalog.drop_table(name)
    }

    /// Looks up a handle to an existing table.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when no such table exists.
    pub fn get_table(&self, name: &str) -> Result<TableHandle> {
        Ok(TableHandle { table: self.catalog.get(name)? })
    }

    /// Creates an index of `kind` on `table.column`, populated from the
    /// current live rows in one critical section.
    ///
    /// # Errors
    ///
    /// `MemDbError::NotFound` for a missing table or column;
    /// `MemDbError::AlreadyExists` when the column is already indexed.
    pub fn create_index(&self, table: &str, column: &str, kind: IndexKind) -> Result<()> {
        self.get_table(table)?.create_index(column, kind)
    }

    /// Drops the index on `table.column`.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` for a missing table or index.
    pub fn drop_index(&self, table: &str, column: &str) -> Result<()> {
        self.get_table(table)?.drop_index(column)
    }

    /// Convenience: runs `query` against the named table.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` for a missing table, plus anything
    /// [`TableHandle::select`] surfaces.
    pub fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>> {
        self.get_table(table)?.select(query)
    }

    pub fn table_names(&self) -> Vec<String> {
        self.catalog.table_names()
    }
}

/// A handle on one table. Clones share the same underlying table; the handle
/// stays valid (and the storage alive) even if the table is dropped from the
/// catalog while an operation is in flight.
#[derive(Debug, Clone)]
pub struct TableHandle {
    table: Arc<Mutex<Table>>,
}

impl TableHandle {
    fn locked(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> String {
        self.locked().name().to_string()
    }

    pub fn schema(&self) -> Schema {
        self.locked().schema().clone()
    }

    /// Largest row id ever assigned.
    pub fn high_water(&self) -> RowId {
        self.locked().high_water()
    }

    /// Number of live rows.
    pub fn count(&self) -> u64 {
        self.locked().live_count()
    }

    /// Inserts one row; returns the new high-water mark (the assigned id).
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::SchemaMismatch` on a value whose tag does not
    /// match its declared column type.
    pub fn insert(&self, row: Row) -> Result<RowId> {
        self.locked().insert(&row)
    }

    /// Inserts many rows under one lock acquisition; returns the assigned
    /// ids. A failure mid-batch leaves the rows inserted so far in place.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::SchemaMismatch` on the first invalid row.
    pub fn insert_batch(&self, rows: Vec<Row>) -> Result<Vec<RowId>> {
        self.locked().insert_batch(&rows)
    }

    /// Applies `updates` to every live row matching `filters` (all live rows
    /// when empty); returns the count of updated rows.
    ///
    /// # Errors
    ///
    /// `MemDbError::SchemaMismatch` for mismatched update values, plus
    /// predicate-resolution errors.
    pub fn update(&self, updates: Row, filters: &[Filter]) -> Result<u64> {
        self.locked().update(&updates, filters)
    }

    /// Tombstones every live row matching `filters` (all live rows when
    /// empty); returns the count.
    ///
    /// # Errors
    ///
    /// Propagates predicate-resolution errors.
    pub fn delete(&self, filters: &[Filter]) -> Result<u64> {
        self.locked().delete(filters)
    }

    /// Runs a query against this table under its lock, observing a
    /// consistent snapshot.
    ///
    /// # Errors
    ///
    /// `MemDbError::NotFound` for filter or order-by columns not in the
    /// schema; `MemDbError::TypeError` for cross-tag comparisons.
    pub fn select(&self, query: &Query) -> Result<Vec<Row>> {
        executor::execute(&self.locked(), query)
    }

    /// # Errors
    ///
    /// `MemDbError::NotFound` for an unknown column;
    /// `MemDbError::AlreadyExists` when the column is already indexed.
    pub fn create_index(&self, column: &str, kind: IndexKind) -> Result<()> {
        self.locked().create_index(column, kind)
    }

    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when the column carries no index.
    pub fn drop_index(&self, column: &str) -> Result<()> {
        self.locked().drop_index(column)
    }

    pub fn index_kind(&self, column: &str) -> Option<IndexKind> {
        self.locked().index_kind(column)
    }

    #[cfg(test)]
    pub(crate) fn check_integrity(&self) {
        self.locked().check_integrity();
    }
}
