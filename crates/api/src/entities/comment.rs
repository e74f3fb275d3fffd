use chrono::{DateTime, Utc};
use db::models;
use serde::Serialize;

#[derive(Clone, Serialize, Debug)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::Comment> for Comment {
    fn from(comment: models::Comment) -> Self {
        Comment {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}
