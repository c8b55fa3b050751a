//! Common repository traits
//!
//! This module defines the interface an application record type implements
//! to be persisted by the generic [`Repository`](super::Repository).

use super::RepositoryError;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{Any, AnyPool, FromRow, QueryBuilder, any::AnyRow};
use std::future::Future;

/// Trait for record types persisted by the generic repository
///
/// The primary key is an integer surrogate key: `0` means "not assigned yet",
/// in which case the store assigns one on insert.
///
/// Rows are read through the sqlx `Any` driver. On MySQL, `TEXT`, `BLOB` and
/// `TINYINT` columns cannot be decoded into `String`/`bool` fields: declare
/// text as `VARCHAR` and integers as `INT`/`BIGINT`.
///
/// # Example
///
/// ```ignore
/// impl Entity for Author {
///     const TABLE: &'static str = "authors";
///     const COLUMNS: &'static [&'static str] = &["name", "bio"];
///     fn id(&self) -> i64 { self.id }
///     fn set_id(&mut self, id: i64) { self.id = id }
///     fn values(&self) -> Vec<Value> { vec![self.name.clone().into(), self.bio.clone().into()] }
/// }
/// ```
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, AnyRow> + Send + Sync + Unpin + 'static
{
    /// Table holding the records
    const TABLE: &'static str;

    /// Primary key column
    const PRIMARY_KEY: &'static str = "id";

    /// Writable columns, excluding the primary key
    const COLUMNS: &'static [&'static str];

    /// Current primary key, `0` when unassigned
    fn id(&self) -> i64;

    /// Stores the primary key assigned by the database
    fn set_id(&mut self, id: i64);

    /// Bind values for [`Entity::COLUMNS`], in the same order
    fn values(&self) -> Vec<Value>;

    /// Populates the association named `association` on every record in `entities`
    ///
    /// Record types without associations keep the default, which rejects every name.
    fn preload<'a>(
        pool: &'a AnyPool,
        entities: &'a mut [Self],
        association: &'a str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send + 'a {
        let _ = (pool, entities);
        async move { Err(RepositoryError::unsupported_relation::<Self>(association)) }
    }
}

/// Dynamically typed bind value handed over by an [`Entity`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Zero values are skipped by partial updates
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(value) => !value,
            Value::Int(value) => *value == 0,
            Value::Float(value) => *value == 0.0,
            Value::Text(value) => value.is_empty(),
        }
    }

    pub(crate) fn bind_to(self, builder: &mut QueryBuilder<'_, Any>) {
        match self {
            Value::Null => builder.push_bind(None::<String>),
            Value::Bool(value) => builder.push_bind(value),
            Value::Int(value) => builder.push_bind(value),
            Value::Float(value) => builder.push_bind(value),
            Value::Text(value) => builder.push_bind(value),
        };
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
