use db::{
    clock::to_millis,
    models::{Post, User},
    types::DbId,
};
use web::AppState;

use super::error::ServiceError;

/// One page of a user's feed. `next_cursor` is the cursor for the following page, `None` once
/// the cached feed is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    pub posts: Vec<(Post, User)>,
    pub next_cursor: Option<i64>,
}

impl FeedPage {
    fn empty() -> Self {
        FeedPage {
            posts: vec![],
            next_cursor: None,
        }
    }
}

pub fn page_size(limit: Option<u32>, state: &AppState) -> usize {
    let settings = &state.config.feed;
    limit
        .unwrap_or(settings.default_page_size)
        .clamp(1, settings.max_page_size.max(1)) as usize
}

/// Reads the feed cache for posts at or before `cursor` (a millisecond epoch, defaulting to now)
/// and hydrates them from the store.
///
/// A missing or cold cache entry yields an empty page; nothing is rebuilt from the store here.
pub async fn get_feed(
    user_id: &DbId,
    cursor: Option<i64>,
    limit: Option<u32>,
    state: &AppState,
) -> Result<FeedPage, ServiceError> {
    let limit = page_size(limit, state);
    let cursor = cursor.unwrap_or_else(|| to_millis(&state.clock.now()));

    // One extra id tells us whether another page exists
    let ids = state.feed_cache.range(user_id, cursor, limit + 1).await?;
    if ids.is_empty() {
        return Ok(FeedPage::empty());
    }

    let mut posts = state.store.posts_by_ids(&ids).await?;
    posts.sort_by(|(a, _), (b, _)| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));

    let next_cursor = if posts.len() > limit {
        posts.truncate(limit);
        posts.last().map(|(post, _)| to_millis(&post.created_at) - 1)
    } else {
        None
    };

    Ok(FeedPage { posts, next_cursor })
}
