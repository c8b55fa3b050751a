use super::Entity;
use thiserror::Error;

/// Failures reported by the generic repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Single-record lookup matched no row
    #[error("record not found")]
    NotFound,

    #[error("{association}: unsupported relations for schema {entity}")]
    UnsupportedRelation {
        entity: &'static str,
        association: String,
    },

    /// Refuses to issue a delete without a `WHERE` clause
    #[error("missing primary key: refusing to delete from {entity} without a condition")]
    MissingPrimaryKey { entity: &'static str },

    #[error("the store did not report the identifier of the inserted row")]
    MissingInsertId,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn unsupported_relation<T: Entity>(association: &str) -> Self {
        Self::UnsupportedRelation {
            entity: T::TABLE,
            association: association.to_owned(),
        }
    }
}
