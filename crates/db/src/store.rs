//! Repository interface over the durable store.
//!
//! Every method that writes more than one row runs inside a single transaction: either all of
//! its rows land or none do. Edge writes (follows, likes) carry their counter adjustments with
//! them, see [`crate::counters`].

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::{
    models::{Comment, Follow, Like, Post, User},
    types::DbId,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record violates unique constraint `{0}`")]
    ConstraintViolation(String),
    #[error("record not found")]
    NotFound,
    #[error("transaction failed: {0}")]
    TransactionFailure(String),
}

impl StoreError {
    pub fn failure(err: impl std::fmt::Display) -> Self {
        Self::TransactionFailure(err.to_string())
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::ConstraintViolation(info.constraint_name().unwrap_or("unknown").to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => Self::NotFound,
            err => Self::failure(err),
        }
    }
}

/// Result of an idempotent edge write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    /// The edge was inserted or deleted and its counters moved with it.
    Applied,
    /// Nothing to do: the edge already existed (insert) or was already gone (delete).
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub author: User,
    pub comments: Vec<Comment>,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<User, StoreError>;

    async fn user_by_id(&self, id: &DbId) -> Result<Option<User>, StoreError>;

    async fn create_post(&self, post: &Post) -> Result<Post, StoreError>;

    /// Batched lookup used to hydrate feed pages. Missing ids are skipped.
    async fn posts_by_ids(&self, ids: &[DbId]) -> Result<Vec<(Post, User)>, StoreError>;

    async fn post_details(
        &self,
        id: &DbId,
        recent_comments: i64,
    ) -> Result<Option<PostDetails>, StoreError>;

    /// Social graph index: everyone following `user_id`.
    async fn follower_ids(&self, user_id: &DbId) -> Result<Vec<DbId>, StoreError>;

    async fn insert_follow(&self, follow: &Follow) -> Result<EdgeChange, StoreError>;

    async fn delete_follow(
        &self,
        follower_id: &DbId,
        following_id: &DbId,
    ) -> Result<EdgeChange, StoreError>;

    async fn insert_like(&self, like: &Like) -> Result<EdgeChange, StoreError>;

    async fn delete_like(&self, user_id: &DbId, post_id: &DbId)
        -> Result<EdgeChange, StoreError>;

    async fn create_comment(&self, comment: &Comment) -> Result<Comment, StoreError>;
}
