use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Catch-all for failures a route has no specific answer for. The cause is logged, the client
/// only learns that something went wrong.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("Error from route, {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
