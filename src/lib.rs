#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::correctness, clippy::perf, clippy::suspicious, clippy::style)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    clippy::doc_markdown,
    clippy::module_inception,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::implicit_hasher,
    clippy::needless_pass_by_value,
    clippy::single_match_else
)]

//! # memdb
//!
//! A thread-safe, in-process, in-memory relational store with a typed
//! schema, columnar storage, secondary indexes, and a small query algebra.
//! It targets embedded use by a host program that wants SQL-like set
//! operations without the cost of an external database.
//!
//! ## Key Features
//!
//! - **Typed columnar tables**: per-column dense storage with a declared
//!   type per column, logical row ids, and tombstone-based deletion
//! - **Secondary indexes**: equality (hash) and ordered (btree) variants,
//!   kept synchronized with column data across insert, update, and delete
//! - **Query algebra**: filter, project, order, limit, combined by a fixed
//!   execution pipeline that uses indexes for point lookups
//! - **Concurrency**: a catalog lock plus one mutex per table; operations on
//!   one table serialize, different tables proceed in parallel
//!
//! ## Quick Start
//!
//! ```
//! use memdb::{ColumnDef, DataType, Database, IndexKind, Operator, Query, Row, Schema};
//!
//! # fn main() -> Result<(), memdb::MemDbError> {
//! let db = Database::new("app");
//! let users = db.create_table(
//!     "users",
//!     Schema::new(vec![
//!         ColumnDef::new("id", DataType::Integer),
//!         ColumnDef::new("name", DataType::Text),
//!         ColumnDef::new("active", DataType::Boolean),
//!     ])?,
//! )?;
//!
//! users.insert(Row::new().set("id", 1_i64).set("name", "Ada").set("active", true))?;
//! users.insert(Row::new().set("id", 2_i64).set("name", "Brian").set("active", false))?;
//! users.create_index("active", IndexKind::Equality)?;
//!
//! let rows = users.select(&Query::new().filter("active", Operator::Eq, true))?;
//! assert_eq!(rows.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **API layer**: [`Database`] (catalog facade) and [`TableHandle`]
//!   (per-table operations under the table lock)
//! - **Query layer**: passive [`Query`] clauses interpreted by an executor
//!   with a fixed pipeline (seed, filter, sort, limit, project)
//! - **Table layer**: columnar storage, tombstones, and index maintenance
//! - **Index layer**: hash and btree buckets from value to live row ids
//!
//! Nothing is persisted: there is no wire protocol, no on-disk format, and
//! no recovery machinery. Dropping a table releases all its storage.

pub mod api;
pub mod core;

pub use api::{Database, TableHandle};
pub use crate::core::common::errors::{MemDbError, Result};
pub use crate::core::common::types::{ColumnDef, DataType, Row, RowId, Schema, Value};
pub use crate::core::config::Config;
pub use crate::core::indexing::IndexKind;
pub use crate::core::query::{Clause, Filter, Operator, Query};
