//! Per-user ranked feed cache.
//!
//! Each user owns one sorted set keyed `feed:{user_id}` whose members are post ids scored by the
//! post's creation time in milliseconds. The cache is never authoritative: everything in it can
//! be derived again from the durable store.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use thiserror::Error;

use crate::types::DbId;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

pub fn feed_key(owner: &DbId) -> String {
    format!("feed:{}", owner)
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("feed cache unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOp {
    /// Insert `post_id` into `owner`'s entry, or move it to `score` if already present.
    Add {
        owner: DbId,
        post_id: DbId,
        score: i64,
    },
    /// Evict the lowest-scored members of `owner`'s entry until at most `keep` remain.
    Trim { owner: DbId, keep: usize },
}

/// A group of cache mutations executed as one atomic unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedBatch {
    ops: Vec<FeedOp>,
}

impl FeedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: &DbId, post_id: &DbId, score: i64) -> &mut Self {
        self.ops.push(FeedOp::Add {
            owner: owner.clone(),
            post_id: post_id.clone(),
            score,
        });
        self
    }

    pub fn trim(&mut self, owner: &DbId, keep: usize) -> &mut Self {
        self.ops.push(FeedOp::Trim {
            owner: owner.clone(),
            keep,
        });
        self
    }

    pub fn ops(&self) -> &[FeedOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[async_trait]
pub trait FeedCache: Send + Sync {
    /// Runs every operation in `batch`, in order, as a single atomic unit. There is no rollback:
    /// if the backend fails after applying part of it, the applied part stays.
    async fn execute(&self, batch: &FeedBatch) -> Result<(), CacheError>;

    /// Up to `count` post ids from `owner`'s entry with score <= `max_score`, highest score first.
    async fn range(
        &self,
        owner: &DbId,
        max_score: i64,
        count: usize,
    ) -> Result<Vec<DbId>, CacheError>;

    async fn len(&self, owner: &DbId) -> Result<usize, CacheError>;
}

/// Redis sorted-set implementation over a shared, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisFeedCache {
    redis: ConnectionManager,
}

impl RedisFeedCache {
    pub fn new(redis: ConnectionManager) -> Self {
        RedisFeedCache { redis }
    }
}

/// Stop index for `ZREMRANGEBYRANK key 0 stop` that leaves the top `keep` members.
fn trim_stop(keep: usize) -> isize {
    -(keep as isize) - 1
}

/// `MULTI`, then `ZADD`/`ZREMRANGEBYRANK` per op in batch order, then `EXEC`.
fn pipeline(batch: &FeedBatch) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for op in batch.ops() {
        match op {
            FeedOp::Add {
                owner,
                post_id,
                score,
            } => {
                pipe.zadd(feed_key(owner), post_id.as_str(), *score).ignore();
            }
            FeedOp::Trim { owner, keep } => {
                pipe.zremrangebyrank(feed_key(owner), 0, trim_stop(*keep))
                    .ignore();
            }
        }
    }
    pipe
}

fn range_cmd(owner: &DbId, max_score: i64, count: usize) -> redis::Cmd {
    redis::Cmd::zrevrangebyscore_limit(feed_key(owner), max_score, "-inf", 0, count as isize)
}

#[async_trait]
impl FeedCache for RedisFeedCache {
    async fn execute(&self, batch: &FeedBatch) -> Result<(), CacheError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut redis = self.redis.clone();
        pipeline(batch).query_async::<_, ()>(&mut redis).await?;
        Ok(())
    }

    async fn range(
        &self,
        owner: &DbId,
        max_score: i64,
        count: usize,
    ) -> Result<Vec<DbId>, CacheError> {
        let mut redis = self.redis.clone();
        let ids: Vec<String> = range_cmd(owner, max_score, count)
            .query_async(&mut redis)
            .await?;
        Ok(ids.into_iter().map(DbId::from).collect())
    }

    async fn len(&self, owner: &DbId) -> Result<usize, CacheError> {
        let mut redis = self.redis.clone();
        Ok(redis.zcard(feed_key(owner)).await?)
    }
}
