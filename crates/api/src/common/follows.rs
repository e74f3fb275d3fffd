use db::{
    models::Follow,
    store::{EdgeChange, StoreError},
    types::DbId,
};
use serde::Serialize;
use web::AppState;

use super::error::ServiceError;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FollowStatus {
    Followed,
    AlreadyFollowing,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UnfollowStatus {
    Unfollowed,
    NotFollowing,
}

pub async fn follow(
    follower_id: &DbId,
    following_id: &DbId,
    state: &AppState,
) -> Result<FollowStatus, ServiceError> {
    if follower_id == following_id {
        return Err(ServiceError::SelfFollow);
    }
    ServiceError::ensure_well_formed("user", &[follower_id, following_id])?;

    let follow = Follow {
        follower_id: follower_id.clone(),
        following_id: following_id.clone(),
        created_at: state.clock.now(),
    };

    match state.store.insert_follow(&follow).await {
        Ok(EdgeChange::Applied) => Ok(FollowStatus::Followed),
        // A concurrent follow won the race for the same edge
        Ok(EdgeChange::Unchanged) | Err(StoreError::ConstraintViolation(_)) => {
            Ok(FollowStatus::AlreadyFollowing)
        }
        Err(err) => Err(ServiceError::from_store("user", err)),
    }
}

pub async fn unfollow(
    follower_id: &DbId,
    following_id: &DbId,
    state: &AppState,
) -> Result<UnfollowStatus, ServiceError> {
    match state.store.delete_follow(follower_id, following_id).await {
        Ok(EdgeChange::Applied) => Ok(UnfollowStatus::Unfollowed),
        Ok(EdgeChange::Unchanged) => Ok(UnfollowStatus::NotFollowing),
        Err(err) => Err(ServiceError::from_store("user", err)),
    }
}
