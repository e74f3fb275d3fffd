use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use db::types::DbId;
use serde::Deserialize;
use web::AppState;

use crate::{
    common::{posts, ServiceError},
    entities::{Comment, Outcome, Post, PostDetails},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostBody {
    user_id: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorBody {
    user_id: String,
}

pub async fn http_post_create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewPostBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let post = posts::create_post(&DbId::from(body.user_id), body.content, &state).await?;
    Ok((StatusCode::CREATED, Json(Post::build(post, None))))
}

pub async fn http_get_details(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let details = posts::details(&DbId::from(post_id), &state).await?;
    Ok(Json(PostDetails::from(details)))
}

pub async fn http_post_like(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    Json(body): Json<ActorBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = posts::like(&DbId::from(body.user_id), &DbId::from(post_id), &state).await?;
    Ok(Json(Outcome::from(status)))
}

pub async fn http_delete_unlike(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    Json(body): Json<ActorBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = posts::unlike(&DbId::from(body.user_id), &DbId::from(post_id), &state).await?;
    Ok(Json(Outcome::from(status)))
}

pub async fn http_post_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    Json(body): Json<NewPostBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let comment = posts::comment(
        &DbId::from(body.user_id),
        &DbId::from(post_id),
        body.content,
        &state,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(Comment::from(comment))))
}

pub fn posts() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", post(http_post_create))
        .route("/posts/:post_id", get(http_get_details))
        .route("/posts/:post_id/like", post(http_post_like))
        .route("/posts/:post_id/unlike", delete(http_delete_unlike))
        .route("/posts/:post_id/comments", post(http_post_comment))
}
