use db::{models::User, store::StoreError};
use web::AppState;

use super::error::ServiceError;

pub const MAX_USERNAME_LENGTH: usize = 100;

pub async fn create_user(username: &str, state: &AppState) -> Result<User, ServiceError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ServiceError::Validation("username must not be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ServiceError::Validation("username is too long"));
    }

    let user = User::new(username.to_string(), state.clock.now());
    match state.store.create_user(&user).await {
        Ok(user) => {
            log::info!("Created user {} ({})", user.username, user.id);
            Ok(user)
        }
        Err(StoreError::ConstraintViolation(_)) => Err(ServiceError::Conflict("username")),
        Err(err) => Err(err.into()),
    }
}
