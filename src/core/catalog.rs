//! The catalog: a named map from table name to shared table.
//!
//! Two lock levels. The catalog lock here protects only the name map and is
//! released before any table lock is taken; callers receive a cloned `Arc`
//! and serialize on the table's own mutex. Readers of different tables
//! therefore run in parallel, while operations against one table appear in a
//! total order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::core::common::errors::{MemDbError, Result};
use crate::core::common::types::Schema;
use crate::core::table::Table;

/// A table shared between the catalog and in-flight handles. Every public
/// operation locks it for its full duration.
pub type SharedTable = Arc<Mutex<Table>>;

#[derive(Debug, Default)]
pub struct Catalog {
    tables: RwLock<HashMap<String, SharedTable>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new, empty table.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::AlreadyExists` when the name is taken.
    pub fn create_table(&self, name: &str, schema: Schema, capacity_hint: usize) -> Result<SharedTable> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if tables.contains_key(name) {
            return Err(MemDbError::AlreadyExists(format!("table '{}'", name)));
        }
        let table = Arc::new(Mutex::new(Table::new(name, schema, capacity_hint)));
        tables.insert(name.to_string(), Arc::clone(&table));
        debug!(table = name, "created table");
        Ok(table)
    }

    /// Removes a table from the catalog. Storage and indexes are released
    /// once the last in-flight operation drops its reference.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when no such table exists.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if tables.remove(name).is_none() {
            return Err(MemDbError::NotFound(format!("table '{}'", name)));
        }
        debug!(table = name, "dropped table");
        Ok(())
    }

    /// Looks up a table by name, cloning the shared handle so the catalog
    /// lock is released before the table lock is taken.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::NotFound` when no such table exists.
    pub fn get(&self, name: &str) -> Result<SharedTable> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(name)
            .cloned()
            .ok_or_else(|| MemDbError::NotFound(format!("table '{}'", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).contains_key(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
