//! Controller - HTTP bindings for the generic repository
//!
//! Routes registered for a record type mounted at prefix `P`:
//! - POST   P        create
//! - GET    P        list
//! - GET    P/{id}   get by id
//! - PUT    P/{id}   partial update
//! - DELETE P/{id}   delete

use crate::core::AppError;
use crate::repositories::{Entity, Repository};
use axum::{
    Router,
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// CRUD handlers for the record type `T`
pub struct Controller<T> {
    repo: Repository<T>,
}

impl<T: Entity> Controller<T> {
    pub fn new(repo: Repository<T>) -> Self {
        Self { repo }
    }

    /// Router with the five CRUD routes, relative to the mount point
    pub fn routes<S>(self: Arc<Self>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::<Arc<Self>>::new()
            .route("/", post(create_handler::<T>).get(find_all_handler::<T>))
            .route(
                "/{id}",
                get(find_by_id_handler::<T>)
                    .put(update_handler::<T>)
                    .delete(delete_handler::<T>),
            )
            .with_state(self)
    }

    /// Adds the CRUD routes to `group` under `prefix`
    ///
    /// An empty prefix (or `/`) mounts the routes at the root of `group`.
    pub fn register_routes<S>(self: Arc<Self>, group: Router<S>, prefix: &str) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        match prefix.trim_matches('/') {
            "" => group.merge(self.routes()),
            prefix => group.nest(&format!("/{prefix}"), self.routes()),
        }
    }
}

fn failed(error: AppError) -> AppError {
    warn!(status = %error.status(), error = %error, "Request failed");
    error
}

#[instrument(skip_all, fields(table = T::TABLE))]
pub async fn create_handler<T: Entity>(
    State(controller): State<Arc<Controller<T>>>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), AppError> {
    // Nothing reaches the store unless the body binds.
    let Json(entity) = payload.map_err(|rejection| failed(rejection.into()))?;

    let entity = controller
        .repo
        .create(entity)
        .await
        .map_err(|err| failed(err.into()))?;

    info!(id = entity.id(), "Record created");
    Ok((StatusCode::CREATED, Json(entity)))
}

#[instrument(skip_all, fields(table = T::TABLE))]
pub async fn find_all_handler<T: Entity>(
    State(controller): State<Arc<Controller<T>>>,
) -> Result<Json<Vec<T>>, AppError> {
    let entities = controller
        .repo
        .find_all(&[])
        .await
        .map_err(|err| failed(err.into()))?;

    info!("Listing {} records", entities.len());
    Ok(Json(entities))
}

/// Every lookup failure answers 404, whatever its cause
#[instrument(skip_all, fields(table = T::TABLE, id = %id))]
pub async fn find_by_id_handler<T: Entity>(
    State(controller): State<Arc<Controller<T>>>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    let entity = controller
        .repo
        .find_by_id(id, &[])
        .await
        .map_err(|err| failed(AppError::NotFound(err.to_string())))?;

    Ok(Json(entity))
}

/// Writes the non-zero fields of the body to the row `id`
///
/// Responds with the submitted representation; the row is not read back.
#[instrument(skip_all, fields(table = T::TABLE, id = %id))]
pub async fn update_handler<T: Entity>(
    State(controller): State<Arc<Controller<T>>>,
    Path(id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    let Json(entity) = payload.map_err(|rejection| failed(rejection.into()))?;

    let affected = controller
        .repo
        .update_fields(id, &entity)
        .await
        .map_err(|err| failed(err.into()))?;

    info!(affected, "Record updated");
    Ok(Json(entity))
}

#[instrument(skip_all, fields(table = T::TABLE, id = %id))]
pub async fn delete_handler<T: Entity>(
    State(controller): State<Arc<Controller<T>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    controller
        .repo
        .delete_by_id(id)
        .await
        .map_err(|err| failed(err.into()))?;

    info!("Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
