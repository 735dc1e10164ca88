//! Error types for memdb.
//!
//! Every fallible operation in the crate surfaces one of these kinds; nothing
//! is retried internally and nothing panics on the public paths.

use thiserror::Error;

/// Main error type for memdb operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemDbError {
    /// A table, index, or column referenced by an operation does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Creating a table or index under a name that is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// An inserted or updated value's tag does not match the declared column type.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Comparing values of incompatible tags inside a predicate, or coercing
    /// an unsupported host value.
    #[error("type error: {0}")]
    TypeError(String),

    /// A malformed request, such as an unknown operator symbol or a schema
    /// with duplicate column names.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MemDbError>;
