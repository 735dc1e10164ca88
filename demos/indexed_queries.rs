//! Secondary indexes: equality lookups served by a hash index, ordered
//! iteration, and range predicates falling back to the scan.

use anyhow::Result;
use memdb::{ColumnDef, DataType, Database, IndexKind, Operator, Query, Row, Schema};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db = Database::new("demo");
    let items = db.create_table(
        "items",
        Schema::new(vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("category", DataType::Text),
            ColumnDef::new("price", DataType::Float),
        ])?,
    )?;

    let categories = ["tools", "parts", "tools", "supplies", "parts", "tools"];
    let rows = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            Row::new()
                .set("id", i as i64 + 1)
                .set("category", *category)
                .set("price", (i as f64 + 1.0) * 2.5)
        })
        .collect();
    items.insert_batch(rows)?;

    // Point lookups on category go through the hash index.
    db.create_index("items", "category", IndexKind::Equality)?;
    let tools = items.select(&Query::new().filter("category", Operator::Eq, "tools"))?;
    println!("{} items in 'tools'", tools.len());

    // An ordered index on price; the executor still scans for ranges, the
    // observable rows are the same either way.
    db.create_index("items", "price", IndexKind::Ordered)?;
    let pricey = items.select(
        &Query::new()
            .filter("price", Operator::GtEq, 7.5)
            .order_by("price", false)
            .select(["id", "price"]),
    )?;
    for row in &pricey {
        println!("id={} price={}", row.get("id").unwrap(), row.get("price").unwrap());
    }

    // Cheapest two items overall.
    let cheapest = items.select(&Query::new().order_by("price", true).limit(2))?;
    println!(
        "cheapest: {} then {}",
        cheapest[0].get("price").unwrap(),
        cheapest[1].get("price").unwrap()
    );

    Ok(())
}
