use std::sync::Arc;

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::Deserialize;
use web::AppState;

use crate::{
    common::{users, ServiceError},
    entities::Account,
};

#[derive(Deserialize)]
pub struct SignUpBody {
    username: String,
}

pub async fn http_post_sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = users::create_user(&body.username, &state).await?;
    Ok((StatusCode::CREATED, Json(Account::from(user))))
}

pub fn auth() -> Router<Arc<AppState>> {
    Router::new().route("/auth/signup", post(http_post_sign_up))
}
