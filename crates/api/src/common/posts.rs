use db::{
    models::{Comment, Like, Post},
    store::{EdgeChange, PostDetails, StoreError},
    types::DbId,
};
use serde::Serialize;
use web::AppState;

use super::{error::ServiceError, fanout};

/// How many comments a post's detail view carries.
pub const RECENT_COMMENTS: i64 = 3;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LikeStatus {
    Liked,
    AlreadyLiked,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UnlikeStatus {
    Unliked,
    NotLiked,
}

fn validate_content(content: &str) -> Result<(), ServiceError> {
    if content.trim().is_empty() {
        return Err(ServiceError::Validation("content must not be empty"));
    }
    Ok(())
}

/// Creates a post and delivers it to feeds, in that order. The post is committed before any
/// cache write is attempted, so a fan-out failure leaves it durable; that case is reported as
/// [`ServiceError::FanOut`].
pub async fn create_post(
    author_id: &DbId,
    content: String,
    state: &AppState,
) -> Result<Post, ServiceError> {
    validate_content(&content)?;
    ServiceError::ensure_well_formed("user", &[author_id])?;

    let post = Post::new(author_id.clone(), content, state.clock.now());
    let post = state
        .store
        .create_post(&post)
        .await
        .map_err(|err| ServiceError::from_store("user", err))?;

    if let Err(source) = fanout::fan_out(&post, state).await {
        return Err(ServiceError::FanOut {
            post_id: post.id,
            source,
        });
    }

    Ok(post)
}

pub async fn like(
    user_id: &DbId,
    post_id: &DbId,
    state: &AppState,
) -> Result<LikeStatus, ServiceError> {
    ServiceError::ensure_well_formed("post", &[user_id, post_id])?;
    let like = Like {
        user_id: user_id.clone(),
        post_id: post_id.clone(),
        created_at: state.clock.now(),
    };

    match state.store.insert_like(&like).await {
        Ok(EdgeChange::Applied) => Ok(LikeStatus::Liked),
        Ok(EdgeChange::Unchanged) | Err(StoreError::ConstraintViolation(_)) => {
            Ok(LikeStatus::AlreadyLiked)
        }
        Err(err) => Err(ServiceError::from_store("post", err)),
    }
}

pub async fn unlike(
    user_id: &DbId,
    post_id: &DbId,
    state: &AppState,
) -> Result<UnlikeStatus, ServiceError> {
    match state.store.delete_like(user_id, post_id).await {
        Ok(EdgeChange::Applied) => Ok(UnlikeStatus::Unliked),
        Ok(EdgeChange::Unchanged) => Ok(UnlikeStatus::NotLiked),
        Err(err) => Err(ServiceError::from_store("post", err)),
    }
}

pub async fn comment(
    user_id: &DbId,
    post_id: &DbId,
    content: String,
    state: &AppState,
) -> Result<Comment, ServiceError> {
    validate_content(&content)?;
    ServiceError::ensure_well_formed("post", &[user_id, post_id])?;

    let comment = Comment::new(post_id.clone(), user_id.clone(), content, state.clock.now());
    state
        .store
        .create_comment(&comment)
        .await
        .map_err(|err| ServiceError::from_store("post", err))
}

pub async fn details(post_id: &DbId, state: &AppState) -> Result<PostDetails, ServiceError> {
    state
        .store
        .post_details(post_id, RECENT_COMMENTS)
        .await?
        .ok_or(ServiceError::NotFound("post"))
}
