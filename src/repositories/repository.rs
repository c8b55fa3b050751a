//! Repository - generic persistence access for any [`Entity`]

use super::{Entity, RepositoryError, Value};
use sqlx::{Any, AnyPool, QueryBuilder};
use std::marker::PhantomData;
use tracing::{debug, info, instrument};

/// CRUD operations for the record type `T`
///
/// Holds a clone of the shared connection pool; one instance per record type.
pub struct Repository<T> {
    connection_pool: AnyPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            connection_pool: self.connection_pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(connection_pool: AnyPool) -> Self {
        Self {
            connection_pool,
            _entity: PhantomData,
        }
    }

    /// Inserts a new record and returns it with the identifier assigned by the database
    #[instrument(skip_all, fields(table = T::TABLE))]
    pub async fn create(&self, mut entity: T) -> Result<T, RepositoryError> {
        debug!("Inserting record");
        let id = self.insert(&entity).await?;
        entity.set_id(id);
        info!("Record created with id {}", id);
        Ok(entity)
    }

    /// Reads every record, expanding the named associations
    ///
    /// Records come back in the order the store returns them.
    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn find_all(&self, preloads: &[&str]) -> Result<Vec<T>, RepositoryError> {
        debug!("Reading all records");
        let sql = format!("SELECT * FROM {}", T::TABLE);
        let mut entities = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.connection_pool)
            .await?;

        self.preload(&mut entities, preloads).await?;
        debug!("Found {} records", entities.len());
        Ok(entities)
    }

    /// Reads a single record by primary key, expanding the named associations
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - No record with that ID
    #[instrument(skip(self, id), fields(table = T::TABLE))]
    pub async fn find_by_id(
        &self,
        id: impl Into<Value>,
        preloads: &[&str],
    ) -> Result<T, RepositoryError> {
        let id = id.into();
        debug!(?id, "Reading record by id");
        let mut builder = QueryBuilder::<Any>::new(format!(
            "SELECT * FROM {} WHERE {} = ",
            T::TABLE,
            T::PRIMARY_KEY
        ));
        id.bind_to(&mut builder);
        builder.push(" LIMIT 1");

        let mut entity = builder
            .build_query_as::<T>()
            .fetch_optional(&self.connection_pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.preload(std::slice::from_mut(&mut entity), preloads)
            .await?;
        Ok(entity)
    }

    /// Saves every column of the record
    ///
    /// A record without primary key is inserted. A record whose primary key
    /// matches no row is inserted with that key.
    #[instrument(skip_all, fields(table = T::TABLE, id = entity.id()))]
    pub async fn update(&self, entity: T) -> Result<T, RepositoryError> {
        let id = entity.id();
        if id == 0 {
            debug!("No primary key, saving as a new record");
            return self.create(entity).await;
        }

        let mut builder = QueryBuilder::<Any>::new(format!("UPDATE {} SET ", T::TABLE));
        push_assignments(
            &mut builder,
            T::COLUMNS.iter().copied().zip(entity.values()),
        );
        builder.push(format!(" WHERE {} = ", T::PRIMARY_KEY));
        builder.push_bind(id);

        let result = builder.build().execute(&self.connection_pool).await?;
        if result.rows_affected() == 0 {
            debug!("No row matched, inserting record");
            self.insert(&entity).await?;
        }

        info!("Record saved");
        Ok(entity)
    }

    /// Writes the non-zero fields of `entity` to the row identified by `id`
    ///
    /// Fields holding a zero value are left untouched. Returns the number of
    /// rows affected; an entity with only zero fields issues no statement.
    #[instrument(skip_all, fields(table = T::TABLE))]
    pub async fn update_fields(
        &self,
        id: impl Into<Value>,
        entity: &T,
    ) -> Result<u64, RepositoryError> {
        let id = id.into();
        debug!(?id, "Updating record fields");
        let assignments: Vec<(&str, Value)> = T::COLUMNS
            .iter()
            .copied()
            .zip(entity.values())
            .filter(|(_, value)| !value.is_zero())
            .collect();

        if assignments.is_empty() {
            debug!("No fields to update");
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Any>::new(format!("UPDATE {} SET ", T::TABLE));
        push_assignments(&mut builder, assignments);
        builder.push(format!(" WHERE {} = ", T::PRIMARY_KEY));
        id.bind_to(&mut builder);

        let result = builder.build().execute(&self.connection_pool).await?;
        info!("Updated {} rows", result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Deletes the row matching the primary key of `entity`
    #[instrument(skip_all, fields(table = T::TABLE, id = entity.id()))]
    pub async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        match entity.id() {
            0 => Err(RepositoryError::MissingPrimaryKey { entity: T::TABLE }),
            id => self.delete_by_id(id).await,
        }
    }

    /// Deletes the row with primary key `id`; a missing row is not an error
    #[instrument(skip(self, id), fields(table = T::TABLE))]
    pub async fn delete_by_id(&self, id: impl Into<Value>) -> Result<(), RepositoryError> {
        let id = id.into();
        debug!(?id, "Deleting record");
        let mut builder = QueryBuilder::<Any>::new(format!(
            "DELETE FROM {} WHERE {} = ",
            T::TABLE,
            T::PRIMARY_KEY
        ));
        id.bind_to(&mut builder);

        let result = builder.build().execute(&self.connection_pool).await?;
        info!("Deleted {} rows", result.rows_affected());
        Ok(())
    }

    async fn preload(&self, entities: &mut [T], preloads: &[&str]) -> Result<(), RepositoryError> {
        for association in preloads {
            debug!(association, "Preloading association");
            T::preload(&self.connection_pool, entities, association).await?;
        }
        Ok(())
    }

    /// Runs the `INSERT` and resolves the primary key of the new row
    async fn insert(&self, entity: &T) -> Result<i64, RepositoryError> {
        let id = entity.id();
        let mut columns = Vec::with_capacity(T::COLUMNS.len() + 1);
        let mut values = Vec::with_capacity(T::COLUMNS.len() + 1);
        if id != 0 {
            columns.push(T::PRIMARY_KEY);
            values.push(Value::Int(id));
        }
        columns.extend_from_slice(T::COLUMNS);
        values.extend(entity.values());

        let mut builder = QueryBuilder::<Any>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            T::TABLE,
            columns.join(", ")
        ));
        for (index, value) in values.into_iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            value.bind_to(&mut builder);
        }
        builder.push(")");

        // The SQLite fallback reads the rowid back, so it must run on the same connection.
        let mut connection = self.connection_pool.acquire().await?;
        let result = builder.build().execute(&mut *connection).await?;
        if id != 0 {
            return Ok(id);
        }

        match result.last_insert_id() {
            Some(id) => Ok(id),
            None if connection.backend_name() == "SQLite" => {
                let id = sqlx::query_scalar::<_, i64>("SELECT last_insert_rowid()")
                    .fetch_one(&mut *connection)
                    .await?;
                Ok(id)
            }
            None => Err(RepositoryError::MissingInsertId),
        }
    }
}

fn push_assignments<'c>(
    builder: &mut QueryBuilder<'_, Any>,
    assignments: impl IntoIterator<Item = (&'c str, Value)>,
) {
    for (index, (column, value)) in assignments.into_iter().enumerate() {
        if index > 0 {
            builder.push(", ");
        }
        builder.push(column).push(" = ");
        value.bind_to(builder);
    }
}
