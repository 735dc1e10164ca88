//! The query executor: interprets a [`Query`] against a [`Table`] under the
//! caller-held table lock, so every run observes a consistent snapshot.
//!
//! Pipeline order is fixed regardless of clause arrival order: seed with the
//! live rows, filter (index bucket for `==` on an indexed column, linear scan
//! otherwise), materialize in ascending row-id order, sort, limit, project.

use crate::core::common::errors::{MemDbError, Result};
use crate::core::common::types::Row;
use crate::core::query::clause::Query;
use crate::core::table::Table;

/// Runs `query` against `table` and returns the matching rows in the
/// required projection, order, and limit.
///
/// Absent an `OrderBy`, rows come back in ascending row-id order, which is
/// deterministic for a given table state. Projection silently omits requested
/// columns that are not in the schema and never clones values of columns that
/// are not projected.
///
/// # Errors
///
/// Propagates predicate-resolution errors (`NotFound`, `TypeError`) and
/// returns `MemDbError::NotFound` for an `OrderBy` on an unknown column.
pub fn execute(table: &Table, query: &Query) -> Result<Vec<Row>> {
    let mut ids = table.resolve(&query.filters())?;

    if let Some((column, ascending)) = query.ordering() {
        let idx = table.schema().get_column_index(column).ok_or_else(|| {
            MemDbError::NotFound(format!(
                "column '{}' in table '{}'",
                column,
                table.name()
            ))
        })?;
        // Stable sort: ties keep ascending row-id order in both directions.
        // Nulls order first ascending and last descending.
        if ascending {
            ids.sort_by(|a, b| table.value_at(idx, *a).cmp(table.value_at(idx, *b)));
        } else {
            ids.sort_by(|a, b| table.value_at(idx, *b).cmp(table.value_at(idx, *a)));
        }
    }

    if let Some(limit) = query.limit_clause() {
        ids.truncate(limit);
    }

    let projected: Vec<(String, usize)> = match query.projection() {
        Some(columns) => columns
            .iter()
            .filter_map(|name| {
                table.schema().get_column_index(name).map(|idx| (name.clone(), idx))
            })
            .collect(),
        None => table
            .schema()
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.name.clone(), idx))
            .collect(),
    };

    let rows = ids
        .into_iter()
        .map(|id| {
            projected
                .iter()
                .map(|(name, idx)| (name.clone(), table.value_at(*idx, id).clone()))
                .collect()
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::types::{ColumnDef, DataType, Schema, Value};
    use crate::core::query::clause::Operator;

    fn items_table() -> Table {
        let schema = Schema::new(vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("price", DataType::Float),
        ])
        .unwrap();
        let mut table = Table::new("items", schema, 0);
        table.insert(&Row::new().set("id", 1_i64).set("price", 10.0)).unwrap();
        table.insert(&Row::new().set("id", 2_i64).set("price", 5.0)).unwrap();
        table.insert(&Row::new().set("id", 3_i64).set("price", 20.0)).unwrap();
        table
    }

    #[test]
    fn unfiltered_select_returns_all_rows_ascending_by_id() {
        let table = items_table();
        let rows = execute(&table, &Query::new()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("id"), Some(&Value::Integer(1)));
        assert_eq!(rows[2].get("id"), Some(&Value::Integer(3)));
    }

    #[test]
    fn order_by_then_limit_yields_a_sorted_prefix() {
        let table = items_table();
        let rows = execute(&table, &Query::new().order_by("price", true).limit(2)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("price"), Some(&Value::Float(5.0)));
        assert_eq!(rows[1].get("price"), Some(&Value::Float(10.0)));
    }

    #[test]
    fn descending_order_reverses_the_comparator() {
        let table = items_table();
        let rows = execute(&table, &Query::new().order_by("price", false)).unwrap();
        let prices: Vec<&Value> = rows.iter().filter_map(|row| row.get("price")).collect();
        assert_eq!(prices, vec![&Value::Float(20.0), &Value::Float(10.0), &Value::Float(5.0)]);
    }

    #[test]
    fn nulls_sort_first_ascending_and_last_descending() {
        let schema = Schema::new(vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("score", DataType::Integer),
        ])
        .unwrap();
        let mut table = Table::new("scores", schema, 0);
        table.insert(&Row::new().set("id", 1_i64).set("score", 7_i64)).unwrap();
        table.insert(&Row::new().set("id", 2_i64)).unwrap();
        table.insert(&Row::new().set("id", 3_i64).set("score", 3_i64)).unwrap();

        let asc = execute(&table, &Query::new().order_by("score", true)).unwrap();
        assert_eq!(asc[0].get("score"), Some(&Value::Null));
        assert_eq!(asc[1].get("score"), Some(&Value::Integer(3)));

        let desc = execute(&table, &Query::new().order_by("score", false)).unwrap();
        assert_eq!(desc[0].get("score"), Some(&Value::Integer(7)));
        assert_eq!(desc[2].get("score"), Some(&Value::Null));
    }

    #[test]
    fn stable_sort_keeps_ascending_id_order_for_ties() {
        let schema = Schema::new(vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("group", DataType::Text),
        ])
        .unwrap();
        let mut table = Table::new("groups", schema, 0);
        for (id, group) in [(1_i64, "b"), (2, "a"), (3, "b"), (4, "a")] {
            table.insert(&Row::new().set("id", id).set("group", group)).unwrap();
        }
        let rows = execute(&table, &Query::new().order_by("group", true)).unwrap();
        let ids: Vec<&Value> = rows.iter().filter_map(|row| row.get("id")).collect();
        assert_eq!(
            ids,
            vec![
                &Value::Integer(2),
                &Value::Integer(4),
                &Value::Integer(1),
                &Value::Integer(3)
            ]
        );

        let rows = execute(&table, &Query::new().order_by("group", false)).unwrap();
        let ids: Vec<&Value> = rows.iter().filter_map(|row| row.get("id")).collect();
        assert_eq!(
            ids,
            vec![
                &Value::Integer(1),
                &Value::Integer(3),
                &Value::Integer(2),
                &Value::Integer(4)
            ]
        );
    }

    #[test]
    fn projection_emits_requested_columns_and_omits_unknown_names() {
        let table = items_table();
        let rows = execute(
            &table,
            &Query::new().select(["price", "ghost"]).filter("id", Operator::Eq, 1_i64),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("price"), Some(&Value::Float(10.0)));
        assert_eq!(rows[0].get("id"), None);
        assert_eq!(rows[0].get("ghost"), None);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn order_by_unknown_column_fails() {
        let table = items_table();
        let err = execute(&table, &Query::new().order_by("ghost", true)).unwrap_err();
        assert!(matches!(err, MemDbError::NotFound(_)));
    }

    #[test]
    fn limit_zero_returns_nothing() {
        let table = items_table();
        let rows = execute(&table, &Query::new().limit(0)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn range_predicates_scan_even_with_an_ordered_index() {
        let mut table = items_table();
        table.create_index("price", crate::core::indexing::IndexKind::Ordered).unwrap();
        let rows =
            execute(&table, &Query::new().filter("price", Operator::Gt, 7.0)).unwrap();
        let mut ids: Vec<i64> = rows
            .iter()
            .filter_map(|row| match row.get("id") {
                Some(Value::Integer(id)) => Some(*id),
                _ => None,
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3]);
    }
}
