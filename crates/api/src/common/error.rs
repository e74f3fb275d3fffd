use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::{feed_cache::CacheError, store::StoreError, types::DbId};
use thiserror::Error;
use web::errors::AppError;

use crate::{common::fanout::FanOutError, error::ApiError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("cannot follow yourself")]
    SelfFollow,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already taken")]
    Conflict(&'static str),
    /// The post is durable; only delivery into feed caches failed.
    #[error("post {post_id} was saved but not delivered to feeds: {source}")]
    FanOut {
        post_id: DbId,
        #[source]
        source: FanOutError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ServiceError {
    /// Reports `entity` as missing when any of `ids` could not name a stored row, before the store
    /// is asked to insert an edge pointing at it.
    pub fn ensure_well_formed(entity: &'static str, ids: &[&DbId]) -> Result<(), Self> {
        if ids.iter().all(|id| id.is_well_formed()) {
            Ok(())
        } else {
            Err(ServiceError::NotFound(entity))
        }
    }

    /// Maps a store failure on a lookup of `entity`, keeping NotFound distinct.
    pub fn from_store(entity: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound(entity),
            err => ServiceError::Store(err),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Validation failed")
                    .describe(message)
                    .into_response()
            }
            ServiceError::SelfFollow => {
                ApiError::new(StatusCode::BAD_REQUEST, "Cannot follow self").into_response()
            }
            ServiceError::NotFound(entity) => {
                ApiError::new(StatusCode::NOT_FOUND, "Record not found")
                    .describe(format!("{} not found", entity))
                    .into_response()
            }
            ServiceError::Conflict(what) => ApiError::new(StatusCode::CONFLICT, "Conflict")
                .describe(format!("{} already taken", what))
                .into_response(),
            ServiceError::FanOut { post_id, source } => {
                log::error!("Fan-out of post {} failed: {}", post_id, source);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Feed delivery failed")
                    .describe(format!(
                        "post {} was saved but not delivered to feeds",
                        post_id
                    ))
                    .into_response()
            }
            ServiceError::Store(err) => AppError::from(err).into_response(),
            ServiceError::Cache(err) => AppError::from(err).into_response(),
        }
    }
}
