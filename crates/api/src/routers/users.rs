use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};
use db::types::DbId;
use serde::Deserialize;
use web::AppState;

use crate::{
    common::{follows, ServiceError},
    entities::Outcome,
};

/// The acting user is named in the body; resolving it from credentials is left to whatever sits
/// in front of this service.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowBody {
    current_user_id: String,
}

pub async fn http_post_follow(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<FollowBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = follows::follow(
        &DbId::from(body.current_user_id),
        &DbId::from(user_id),
        &state,
    )
    .await?;
    Ok(Json(Outcome::from(status)))
}

pub async fn http_delete_unfollow(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<FollowBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = follows::unfollow(
        &DbId::from(body.current_user_id),
        &DbId::from(user_id),
        &state,
    )
    .await?;
    Ok(Json(Outcome::from(status)))
}

pub fn users() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/:user_id/follow", post(http_post_follow))
        .route("/users/:user_id/unfollow", delete(http_delete_unfollow))
}
