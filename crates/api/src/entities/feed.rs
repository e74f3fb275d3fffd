use serde::Serialize;

use super::Post;
use crate::common::feed::FeedPage;

#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub posts: Vec<Post>,
    /// Always present, `null` on the last page.
    pub next_cursor: Option<i64>,
}

impl From<FeedPage> for Feed {
    fn from(page: FeedPage) -> Self {
        Feed {
            posts: page
                .posts
                .into_iter()
                .map(|(post, author)| Post::build(post, Some(author)))
                .collect(),
            next_cursor: page.next_cursor,
        }
    }
}
