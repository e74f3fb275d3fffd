use serde::Serialize;

use crate::common::{
    follows::{FollowStatus, UnfollowStatus},
    posts::{LikeStatus, UnlikeStatus},
};

/// Answer to an idempotent action. No-ops are successes too, they just carry a different status.
#[derive(Clone, Serialize, Debug)]
pub struct Outcome<S> {
    pub status: S,
    pub message: &'static str,
}

impl From<FollowStatus> for Outcome<FollowStatus> {
    fn from(status: FollowStatus) -> Self {
        let message = match status {
            FollowStatus::Followed => "Followed successfully",
            FollowStatus::AlreadyFollowing => "Already following",
        };
        Outcome { status, message }
    }
}

impl From<UnfollowStatus> for Outcome<UnfollowStatus> {
    fn from(status: UnfollowStatus) -> Self {
        let message = match status {
            UnfollowStatus::Unfollowed => "Unfollowed successfully",
            UnfollowStatus::NotFollowing => "Not following",
        };
        Outcome { status, message }
    }
}

impl From<LikeStatus> for Outcome<LikeStatus> {
    fn from(status: LikeStatus) -> Self {
        let message = match status {
            LikeStatus::Liked => "Post liked",
            LikeStatus::AlreadyLiked => "Post already liked",
        };
        Outcome { status, message }
    }
}

impl From<UnlikeStatus> for Outcome<UnlikeStatus> {
    fn from(status: UnlikeStatus) -> Self {
        let message = match status {
            UnlikeStatus::Unliked => "Post unliked",
            UnlikeStatus::NotLiked => "Post was not liked",
        };
        Outcome { status, message }
    }
}
