//! Basic CRUD walkthrough: create a table, insert rows, query, update,
//! delete.

use anyhow::Result;
use memdb::{ColumnDef, DataType, Database, Filter, Operator, Query, Row, Schema};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db = Database::new("demo");
    let users = db.create_table(
        "users",
        Schema::new(vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("name", DataType::Text),
            ColumnDef::new("active", DataType::Boolean),
        ])?,
    )?;

    println!("=== Insert ===");
    let ids = users.insert_batch(vec![
        Row::new().set("id", 1_i64).set("name", "Ada").set("active", true),
        Row::new().set("id", 2_i64).set("name", "Brian").set("active", false),
        Row::new().set("id", 3_i64).set("name", "Grace").set("active", true),
    ])?;
    println!("inserted rows {:?}", ids);

    println!("\n=== Select active users ===");
    let rows = users.select(
        &Query::new().filter("active", Operator::Eq, true).select(["id", "name"]),
    )?;
    for row in &rows {
        println!("id={} name={}", row.get("id").unwrap(), row.get("name").unwrap());
    }

    println!("\n=== Update ===");
    let updated = users.update(
        Row::new().set("active", false),
        &[Filter::new("name", Operator::Eq, "Ada")],
    )?;
    println!("deactivated {} user(s)", updated);

    println!("\n=== Delete ===");
    let deleted = users.delete(&[Filter::new("active", Operator::Eq, false)])?;
    println!("removed {} inactive user(s), {} remain", deleted, users.count());

    println!("\n=== Rows from JSON ===");
    let row = Row::try_from(serde_json::json!({"id": 4, "name": "Edsger", "active": true}))?;
    users.insert(row)?;
    for row in users.select(&Query::new())? {
        println!("id={} name={}", row.get("id").unwrap(), row.get("name").unwrap());
    }

    Ok(())
}
