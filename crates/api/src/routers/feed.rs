use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use db::types::DbId;
use serde::Deserialize;
use web::AppState;

use crate::{
    common::{feed, ServiceError},
    entities::Feed,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    user_id: String,
    /// Millisecond epoch; only posts at or before it are returned.
    cursor: Option<i64>,
    limit: Option<u32>,
}

pub async fn http_get_feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = feed::get_feed(&DbId::from(query.user_id), query.cursor, query.limit, &state).await?;
    Ok(Json(Feed::from(page)))
}

pub fn feed() -> Router<Arc<AppState>> {
    Router::new().route("/feed", get(http_get_feed))
}
