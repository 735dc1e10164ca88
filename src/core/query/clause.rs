//! Passive query description: clauses and the builder that collects them.
//!
//! A query is a bag of clauses appended in any order; the executor imposes
//! the semantic order (filter, sort, limit, project) regardless of arrival
//! order. Only the first `Select`, `OrderBy`, and `Limit` clauses are
//! honored; every `Where` clause participates, conjoined in appearance order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::common::errors::{MemDbError, Result};
use crate::core::common::types::Value;

/// Comparison operator of a `Where` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl Operator {
    /// Whether a comparison outcome satisfies this operator. Resolved once
    /// per clause; the scan loop never matches symbols.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::NotEq => ordering != Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::LtEq => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::GtEq => ordering != Ordering::Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
        }
    }
}

impl FromStr for Operator {
    type Err = MemDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::NotEq),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::LtEq),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::GtEq),
            other => Err(MemDbError::InvalidArgument(format!("unknown operator '{}'", other))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single `Where` condition: `column <operator> value`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Filter {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self { column: column.into(), operator, value: value.into() }
    }
}

/// One element of a query.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Clause {
    Where(Filter),
    Select(Vec<String>),
    OrderBy { column: String, ascending: bool },
    Limit(usize),
}

/// A passive bag of clauses referencing one table.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `Where` clause; repeated filters conjoin.
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::Where(Filter::new(column, operator, value)));
        self
    }

    /// Appends a projection clause listing the columns to emit.
    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses.push(Clause::Select(columns.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.clauses.push(Clause::OrderBy { column: column.into(), ascending });
        self
    }

    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.clauses.push(Clause::Limit(n));
        self
    }

    /// Appends an already-built clause.
    #[must_use]
    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Every `Where` clause, in appearance order.
    pub fn filters(&self) -> Vec<&Filter> {
        self.clauses
            .iter()
            .filter_map(|clause| match clause {
                Clause::Where(filter) => Some(filter),
                _ => None,
            })
            .collect()
    }

    /// The first `Select` clause, if any.
    pub fn projection(&self) -> Option<&[String]> {
        self.clauses.iter().find_map(|clause| match clause {
            Clause::Select(columns) => Some(columns.as_slice()),
            _ => None,
        })
    }

    /// The first `OrderBy` clause, if any.
    pub fn ordering(&self) -> Option<(&str, bool)> {
        self.clauses.iter().find_map(|clause| match clause {
            Clause::OrderBy { column, ascending } => Some((column.as_str(), *ascending)),
            _ => None,
        })
    }

    /// The first `Limit` clause, if any.
    pub fn limit_clause(&self) -> Option<usize> {
        self.clauses.iter().find_map(|clause| match clause {
            Clause::Limit(n) => Some(*n),
            _ => None,
        })
    }
}
