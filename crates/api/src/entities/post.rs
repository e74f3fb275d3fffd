use chrono::{DateTime, Utc};
use db::{clock::to_millis, models, store};
use serde::Serialize;
use serde_with::skip_serializing_none;

use super::{Author, Comment};

#[skip_serializing_none]
#[derive(Clone, Serialize, Debug)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author: Option<Author>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Feed score of the post, usable as a feed cursor.
    pub timestamp: i64,
    pub like_count: i32,
    pub comment_count: i32,
}

impl Post {
    pub fn build(post: models::Post, author: Option<models::User>) -> Self {
        Post {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            author: author.map(Author::from),
            timestamp: to_millis(&post.created_at),
            content: post.content,
            created_at: post.created_at,
            like_count: post.like_count,
            comment_count: post.comment_count,
        }
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct PostDetails {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl From<store::PostDetails> for PostDetails {
    fn from(details: store::PostDetails) -> Self {
        PostDetails {
            post: Post::build(details.post, Some(details.author)),
            comments: details.comments.into_iter().map(Comment::from).collect(),
        }
    }
}
