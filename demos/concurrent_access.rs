//! Many writers and readers sharing one database: operations on a table
//! serialize on its lock while separate tables proceed in parallel.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use memdb::{ColumnDef, DataType, Database, Filter, Operator, Query, Row, Schema};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db = Arc::new(Database::new("demo"));
    let schema = Schema::new(vec![
        ColumnDef::new("worker", DataType::Integer),
        ColumnDef::new("value", DataType::Integer),
    ])?;
    let events = db.create_table("events", schema)?;

    let mut writers = Vec::new();
    for worker in 0..4_i64 {
        let events = events.clone();
        writers.push(thread::spawn(move || {
            for value in 0..250_i64 {
                events
                    .insert(Row::new().set("worker", worker).set("value", value))
                    .expect("insert");
            }
        }));
    }

    let reader = {
        let events = events.clone();
        thread::spawn(move || {
            let mut last_seen = 0;
            while last_seen < 500 {
                last_seen = events.count();
            }
            last_seen
        })
    };

    for writer in writers {
        writer.join().expect("writer thread");
    }
    println!("reader caught up at {} rows", reader.join().expect("reader thread"));
    println!("total rows: {}", events.count());

    let per_worker = events.select(
        &Query::new().filter("worker", Operator::Eq, 2_i64).select(["value"]),
    )?;
    println!("worker 2 wrote {} rows", per_worker.len());

    let removed = events.delete(&[Filter::new("value", Operator::Lt, 100_i64)])?;
    println!("pruned {} rows below the threshold, {} remain", removed, events.count());

    Ok(())
}
