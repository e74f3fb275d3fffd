use chrono::{DateTime, Utc};
use db::models::User;
use serde::Serialize;

#[derive(Clone, Serialize, Debug)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for Account {
    fn from(user: User) -> Self {
        Account {
            id: user.id.to_string(),
            username: user.username,
            follower_count: user.follower_count,
            following_count: user.following_count,
            created_at: user.created_at,
        }
    }
}

/// The slice of an account embedded into posts.
#[derive(Clone, Serialize, Debug)]
pub struct Author {
    pub id: String,
    pub username: String,
}

impl From<User> for Author {
    fn from(user: User) -> Self {
        Author {
            id: user.id.to_string(),
            username: user.username,
        }
    }
}
