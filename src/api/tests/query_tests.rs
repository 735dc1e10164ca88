//! Executor semantics through the public surface: index/scan parity, clause
//! precedence, silent omissions, and the type-error rules.

use crate::api::Database;
use crate::core::common::errors::MemDbError;
use crate::core::common::types::{ColumnDef, DataType, Row, Schema, Value};
use crate::core::indexing::IndexKind;
use crate::core::query::clause::{Filter, Operator, Query};

fn people_db() -> Database {
    let db = Database::new("test");
    let people = db
        .create_table(
            "people",
            Schema::new(vec![
                ColumnDef::new("id", DataType::Integer),
                ColumnDef::new("name", DataType::Text),
                ColumnDef::new("age", DataType::Integer),
            ])
            .unwrap(),
        )
        .unwrap();
    people
        .insert_batch(vec![
            Row::new().set("id", 1_i64).set("name", "A").set("age", 30_i64),
            Row::new().set("id", 2_i64).set("name", "B").set("age", 25_i64),
            Row::new().set("id", 3_i64).set("name", "A").set("age", 40_i64),
            Row::new().set("id", 4_i64).set("age", 25_i64), // name defaults to null
            Row::new().set("id", 5_i64).set("name", "C").set("age", 35_i64),
        ])
        .unwrap();
    db
}

/// The same equality query returns the same rows whether or not the column
/// is indexed, across lookups that hit, miss, and probe null.
#[test]
fn equality_results_agree_between_index_and_scan() {
    let db = people_db();
    let people = db.get_table("people").unwrap();
    let probes = vec![
        Value::Text("A".to_string()),
        Value::Text("missing".to_string()),
        Value::Null,
    ];

    let scanned: Vec<_> = probes
        .iter()
        .map(|v| people.select(&Query::new().filter("name", Operator::Eq, v.clone())).unwrap())
        .collect();
    people.create_index("name", IndexKind::Equality).unwrap();
    let indexed: Vec<_> = probes
        .iter()
        .map(|v| people.select(&Query::new().filter("name", Operator::Eq, v.clone())).unwrap())
        .collect();

    assert_eq!(scanned, indexed);
    assert_eq!(scanned[0].len(), 2);
    assert_eq!(scanned[1].len(), 0);
    assert_eq!(scanned[2].len(), 1);
}

/// Parity also holds after deletes and updates churn the index.
#[test]
fn parity_survives_mutation_churn() {
    let db = people_db();
    let people = db.get_table("people").unwrap();
    people.create_index("age", IndexKind::Equality).unwrap();

    people
        .update(Row::new().set("age", 25_i64), &[Filter::new("id", Operator::Eq, 1_i64)])
        .unwrap();
    people.delete(&[Filter::new("id", Operator::Eq, 2_i64)]).unwrap();

    let indexed = people.select(&Query::new().filter("age", Operator::Eq, 25_i64)).unwrap();
    people.drop_index("age").unwrap();
    let scanned = people.select(&Query::new().filter("age", Operator::Eq, 25_i64)).unwrap();
    assert_eq!(indexed, scanned);
    let ids: Vec<&Value> = indexed.iter().filter_map(|row| row.get("id")).collect();
    assert_eq!(ids, vec![&Value::Integer(1), &Value::Integer(4)]);
}

/// Sorting then limiting yields a prefix of the globally sorted result.
#[test]
fn limit_after_order_is_a_sorted_prefix() {
    let db = people_db();
    let people = db.get_table("people").unwrap();
    let full = people.select(&Query::new().order_by("age", true)).unwrap();
    for n in 0..=full.len() {
        let limited =
            people.select(&Query::new().order_by("age", true).limit(n)).unwrap();
        assert_eq!(limited.as_slice(), &full[..n]);
    }
}

#[test]
fn multiple_where_clauses_conjoin() {
    let db = people_db();
    let rows = db
        .select(
            "people",
            &Query::new()
                .filter("age", Operator::GtEq, 25_i64)
                .filter("age", Operator::Lt, 40_i64)
                .filter("name", Operator::NotEq, "B"),
        )
        .unwrap();
    let mut ids: Vec<i64> = rows
        .iter()
        .filter_map(|row| match row.get("id") {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        })
        .collect();
    ids.sort_unstable();
    // Row 4 has a null name: null is not equal to "B", so it survives.
    assert_eq!(ids, vec![1, 4, 5]);
}

#[test]
fn cross_tag_comparison_is_a_type_error_even_on_empty_tables() {
    let db = Database::new("test");
    let empty = db
        .create_table("empty", Schema::new(vec![ColumnDef::new("n", DataType::Integer)]).unwrap())
        .unwrap();
    let err = empty.select(&Query::new().filter("n", Operator::Eq, "five")).unwrap_err();
    assert!(matches!(err, MemDbError::TypeError(_)));

    // Same outcome with an index on the column.
    empty.create_index("n", IndexKind::Equality).unwrap();
    let err = empty.select(&Query::new().filter("n", Operator::Eq, "five")).unwrap_err();
    assert!(matches!(err, MemDbError::TypeError(_)));
}

#[test]
fn filtering_an_unknown_column_fails() {
    let db = people_db();
    let err = db.select("people", &Query::new().filter("ghost", Operator::Eq, 1_i64)).unwrap_err();
    assert!(matches!(err, MemDbError::NotFound(_)));
}

#[test]
fn null_probes_use_the_null_ordering() {
    let db = people_db();
    // Every non-null name is greater than null; row 4's null name is not.
    let rows = db.select("people", &Query::new().filter("name", Operator::Gt, Value::Null)).unwrap();
    assert_eq!(rows.len(), 4);
    let rows = db.select("people", &Query::new().filter("name", Operator::LtEq, Value::Null)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&Value::Integer(4)));
}

#[test]
fn unknown_projection_columns_are_silently_omitted() {
    let db = people_db();
    let rows = db
        .select("people", &Query::new().select(["name", "ghost"]).limit(1))
        .unwrap();
    assert_eq!(rows[0].len(), 1);
    assert!(rows[0].get("ghost").is_none());
}

#[test]
fn unknown_update_columns_are_silently_ignored() {
    let db = people_db();
    let people = db.get_table("people").unwrap();
    let count = people.update(Row::new().set("ghost", 1_i64), &[]).unwrap();
    // Every live row "matched"; nothing observable changed.
    assert_eq!(count, 5);
    let rows = people.select(&Query::new().select(["ghost"])).unwrap();
    assert!(rows.iter().all(Row::is_empty));
}

#[test]
fn repeated_select_order_and_limit_clauses_are_ignored_after_the_first() {
    let db = people_db();
    let rows = db
        .select(
            "people",
            &Query::new()
                .select(["id"])
                .select(["name"])
                .order_by("age", true)
                .order_by("id", false)
                .limit(2)
                .limit(100),
        )
        .unwrap();
    assert_eq!(rows.len(), 2);
    // Projected by the first select clause only.
    assert!(rows.iter().all(|row| row.get("id").is_some() && row.get("name").is_none()));
    // Ordered by the first order-by clause: youngest first.
    assert_eq!(rows[0].get("id"), Some(&Value::Integer(2)));
}

#[test]
fn clause_arrival_order_does_not_matter() {
    let db = people_db();
    let a = db
        .select(
            "people",
            &Query::new().limit(2).order_by("age", true).filter("age", Operator::Gt, 25_i64),
        )
        .unwrap();
    let b = db
        .select(
            "people",
            &Query::new().filter("age", Operator::Gt, 25_i64).order_by("age", true).limit(2),
        )
        .unwrap();
    assert_eq!(a, b);
}
