//! Association loaders used by [`Entity::preload`] implementations
//!
//! Each loader issues one `IN (...)` query for the whole batch of parents.

use super::{Entity, RepositoryError};
use sqlx::{Any, AnyPool, QueryBuilder};
use tracing::debug;

/// Loads the records of `C` whose primary key is in `ids` (belongs-to side)
pub async fn load_by_ids<C: Entity>(pool: &AnyPool, ids: &[i64]) -> Result<Vec<C>, RepositoryError> {
    load_where_in(pool, C::PRIMARY_KEY, ids).await
}

/// Loads the records of `C` whose `foreign_key` column is in `parent_ids` (has-many side)
pub async fn load_by_foreign_key<C: Entity>(
    pool: &AnyPool,
    foreign_key: &str,
    parent_ids: &[i64],
) -> Result<Vec<C>, RepositoryError> {
    load_where_in(pool, foreign_key, parent_ids).await
}

async fn load_where_in<C: Entity>(
    pool: &AnyPool,
    column: &str,
    ids: &[i64],
) -> Result<Vec<C>, RepositoryError> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    debug!(table = C::TABLE, column, keys = ids.len(), "Loading association");
    let mut query_builder =
        QueryBuilder::<Any>::new(format!("SELECT * FROM {} WHERE {} IN (", C::TABLE, column));
    let mut separated = query_builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let records = query_builder
        .build_query_as::<C>()
        .fetch_all(pool)
        .await?;
    Ok(records)
}
