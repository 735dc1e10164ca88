use std::collections::HashSet;

use super::data_type::DataType;
use crate::core::common::errors::{MemDbError, Result};

/// A single column declaration. The type is fixed at table creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self { name: name.into(), data_type }
    }
}

/// An ordered set of column declarations. Declaration order fixes the default
/// projection order; lookups are by name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    /// Builds a schema from column declarations.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::InvalidArgument` when two columns share a name.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(MemDbError::InvalidArgument(format!(
                    "duplicate column name '{}' in schema",
                    col.name
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
