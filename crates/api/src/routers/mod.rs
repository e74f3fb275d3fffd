pub mod auth;
pub mod feed;
pub mod posts;
pub mod users;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use web::AppState;

pub fn api() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::auth())
        .merge(users::users())
        .merge(posts::posts())
        .merge(feed::feed())
}
