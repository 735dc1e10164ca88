use std::collections::hash_map;
use std::collections::HashMap;

use super::value::Value;
use crate::core::common::errors::{MemDbError, Result};

/// A mapping from column name to value.
///
/// Rows serve both directions of the boundary: as insert/update input (where
/// missing columns default to null and unknown names are ignored) and as the
/// projected output of a query.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, coercing any host value into the value domain.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Host-value boundary: a JSON object coerced field-wise into a row.
impl TryFrom<serde_json::Value> for Row {
    type Error = MemDbError;

    fn try_from(v: serde_json::Value) -> Result<Self> {
        match v {
            serde_json::Value::Object(fields) => {
                let mut row = Row::new();
                for (name, field) in fields {
                    row.insert(name, Value::try_from(field)?);
                }
                Ok(row)
            }
            other => Err(MemDbError::TypeError(format!(
                "expected a JSON object for a row, got: {}",
                other
            ))),
        }
    }
}
