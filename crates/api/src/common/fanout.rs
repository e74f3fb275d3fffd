//! Fan-out on write.
//!
//! Runs after the post is committed and never touches the durable store except to read the
//! follower set. Cache delivery is best-effort: a failure is reported to the caller but nothing
//! already applied is undone, and the post stays durable. Users whose entries missed the post
//! only see it again once their feed is rebuilt from the store.
//!
//! TODO: accounts with very large follower sets produce one unbounded batch here; a hybrid
//! fan-out-on-read path for them would cap the batch size.

use db::{
    clock::to_millis,
    feed_cache::{CacheError, FeedBatch},
    models::Post,
    store::StoreError,
    types::DbId,
};
use thiserror::Error;
use web::{config::Feed, AppState};

#[derive(Debug, Error)]
pub enum FanOutError {
    #[error("could not resolve followers: {0}")]
    Followers(#[source] StoreError),
    #[error("could not write feed entries: {0}")]
    Cache(#[source] CacheError),
}

/// Builds the cache mutations delivering `post` to its author and to `followers`. Every touched
/// entry is trimmed back to `max_entries` right after the insert.
pub fn plan(post: &Post, followers: &[DbId], max_entries: usize) -> FeedBatch {
    let score = to_millis(&post.created_at);
    let mut batch = FeedBatch::new();

    batch.add(&post.author_id, &post.id, score);
    for follower in followers.iter().filter(|id| **id != post.author_id) {
        batch
            .add(follower, &post.id, score)
            .trim(follower, max_entries);
    }
    batch.trim(&post.author_id, max_entries);

    batch
}

pub async fn fan_out(post: &Post, state: &AppState) -> Result<(), FanOutError> {
    let settings: &Feed = &state.config.feed;
    let followers = state
        .store
        .follower_ids(&post.author_id)
        .await
        .map_err(FanOutError::Followers)?;

    if followers.len() > settings.fanout_warn_threshold {
        log::warn!(
            "Post {} by {} fans out to {} followers",
            post.id,
            post.author_id,
            followers.len()
        );
    }

    let batch = plan(post, &followers, settings.max_entries);
    state
        .feed_cache
        .execute(&batch)
        .await
        .map_err(FanOutError::Cache)?;

    log::debug!(
        "Delivered post {} to {} followers ({} cache ops)",
        post.id,
        followers.len(),
        batch.len()
    );

    Ok(())
}
