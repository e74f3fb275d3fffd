//! In-process implementations of [`Store`] and [`FeedCache`].
//!
//! Each call takes a single write lock for its whole duration, which gives the same
//! all-or-nothing visibility the Postgres transactions provide. Preconditions are checked before
//! anything is mutated, so a failing call leaves no trace.

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    counters::{self, Counter, CounterChange},
    feed_cache::{CacheError, FeedBatch, FeedCache, FeedOp},
    models::{Comment, Follow, Like, Post, User},
    store::{EdgeChange, PostDetails, Store, StoreError},
    types::DbId,
};

#[derive(Default)]
struct Tables {
    users: HashMap<DbId, User>,
    posts: HashMap<DbId, Post>,
    // (follower_id, following_id)
    follows: HashSet<(DbId, DbId)>,
    // (user_id, post_id)
    likes: HashSet<(DbId, DbId)>,
    comments: Vec<Comment>,
}

impl Tables {
    fn check(&self, changes: &[CounterChange]) -> Result<(), StoreError> {
        for change in changes {
            let present = match change.counter {
                Counter::Followers | Counter::Following => self.users.contains_key(&change.target),
                Counter::Likes | Counter::Comments => self.posts.contains_key(&change.target),
            };
            if !present {
                return Err(StoreError::NotFound);
            }
        }
        Ok(())
    }

    /// Only call after [`Tables::check`] succeeded for the same changes.
    fn apply(&mut self, changes: &[CounterChange]) {
        for change in changes {
            match change.counter {
                Counter::Followers => {
                    if let Some(user) = self.users.get_mut(&change.target) {
                        user.follower_count += change.delta;
                    }
                }
                Counter::Following => {
                    if let Some(user) = self.users.get_mut(&change.target) {
                        user.following_count += change.delta;
                    }
                }
                Counter::Likes => {
                    if let Some(post) = self.posts.get_mut(&change.target) {
                        post.like_count += change.delta;
                    }
                }
                Counter::Comments => {
                    if let Some(post) = self.posts.get_mut(&change.target) {
                        post.comment_count += change.delta;
                    }
                }
            }
        }
    }

    fn with_author(&self, post: &Post) -> Option<(Post, User)> {
        self.users
            .get(&post.author_id)
            .map(|author| (post.clone(), author.clone()))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    strict_edges: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of like edges pointing at `post_id`.
    pub async fn like_edges(&self, post_id: &DbId) -> usize {
        let tables = self.tables.read().await;
        tables.likes.iter().filter(|(_, post)| post == post_id).count()
    }

    pub async fn post_by_id(&self, id: &DbId) -> Option<Post> {
        self.tables.read().await.posts.get(id).cloned()
    }

    /// While set, inserting an edge that already exists fails with
    /// [`StoreError::ConstraintViolation`] instead of reporting [`EdgeChange::Unchanged`], the way
    /// a plain `INSERT` without conflict handling would.
    pub fn set_strict_edges(&self, strict: bool) {
        self.strict_edges.store(strict, Ordering::SeqCst);
    }

    fn duplicate_edge(&self, constraint: &str) -> Result<EdgeChange, StoreError> {
        if self.strict_edges.load(Ordering::SeqCst) {
            return Err(StoreError::ConstraintViolation(constraint.to_string()));
        }
        Ok(EdgeChange::Unchanged)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::ConstraintViolation(
                "users_username_key".to_string(),
            ));
        }
        if tables.users.contains_key(&user.id) {
            return Err(StoreError::ConstraintViolation("users_pkey".to_string()));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn user_by_id(&self, id: &DbId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn create_post(&self, post: &Post) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(StoreError::NotFound);
        }
        if tables.posts.contains_key(&post.id) {
            return Err(StoreError::ConstraintViolation("posts_pkey".to_string()));
        }
        tables.posts.insert(post.id.clone(), post.clone());
        Ok(post.clone())
    }

    async fn posts_by_ids(&self, ids: &[DbId]) -> Result<Vec<(Post, User)>, StoreError> {
        let tables = self.tables.read().await;
        // HashMap iteration order stands in for a store that returns rows in no useful order.
        let wanted: HashSet<&DbId> = ids.iter().collect();
        Ok(tables
            .posts
            .values()
            .filter(|post| wanted.contains(&post.id))
            .filter_map(|post| tables.with_author(post))
            .collect())
    }

    async fn post_details(
        &self,
        id: &DbId,
        recent_comments: i64,
    ) -> Result<Option<PostDetails>, StoreError> {
        let tables = self.tables.read().await;
        let Some((post, author)) = tables.posts.get(id).and_then(|post| tables.with_author(post))
        else {
            return Ok(None);
        };

        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|comment| comment.post_id == post.id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (&b.created_at, &b.id).cmp(&(&a.created_at, &a.id)));
        comments.truncate(recent_comments.max(0) as usize);

        Ok(Some(PostDetails {
            post,
            author,
            comments,
        }))
    }

    async fn follower_ids(&self, user_id: &DbId) -> Result<Vec<DbId>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|(_, following)| following == user_id)
            .map(|(follower, _)| follower.clone())
            .collect())
    }

    async fn insert_follow(&self, follow: &Follow) -> Result<EdgeChange, StoreError> {
        let mut tables = self.tables.write().await;
        let edge = (follow.follower_id.clone(), follow.following_id.clone());
        if tables.follows.contains(&edge) {
            return self.duplicate_edge("follows_pkey");
        }

        let changes = counters::for_follow(&follow.follower_id, &follow.following_id, 1);
        tables.check(&changes)?;
        tables.follows.insert(edge);
        tables.apply(&changes);
        Ok(EdgeChange::Applied)
    }

    async fn delete_follow(
        &self,
        follower_id: &DbId,
        following_id: &DbId,
    ) -> Result<EdgeChange, StoreError> {
        let mut tables = self.tables.write().await;
        let edge = (follower_id.clone(), following_id.clone());
        if !tables.follows.contains(&edge) {
            return Ok(EdgeChange::Unchanged);
        }

        let changes = counters::for_follow(follower_id, following_id, -1);
        tables.check(&changes)?;
        tables.follows.remove(&edge);
        tables.apply(&changes);
        Ok(EdgeChange::Applied)
    }

    async fn insert_like(&self, like: &Like) -> Result<EdgeChange, StoreError> {
        let mut tables = self.tables.write().await;
        let edge = (like.user_id.clone(), like.post_id.clone());
        if tables.likes.contains(&edge) {
            return self.duplicate_edge("likes_pkey");
        }
        if !tables.users.contains_key(&like.user_id) {
            return Err(StoreError::NotFound);
        }

        let changes = counters::for_like(&like.post_id, 1);
        tables.check(&changes)?;
        tables.likes.insert(edge);
        tables.apply(&changes);
        Ok(EdgeChange::Applied)
    }

    async fn delete_like(
        &self,
        user_id: &DbId,
        post_id: &DbId,
    ) -> Result<EdgeChange, StoreError> {
        let mut tables = self.tables.write().await;
        let edge = (user_id.clone(), post_id.clone());
        if !tables.likes.contains(&edge) {
            return Ok(EdgeChange::Unchanged);
        }

        let changes = counters::for_like(post_id, -1);
        tables.check(&changes)?;
        tables.likes.remove(&edge);
        tables.apply(&changes);
        Ok(EdgeChange::Applied)
    }

    async fn create_comment(&self, comment: &Comment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&comment.user_id) {
            return Err(StoreError::NotFound);
        }

        let changes = counters::for_comment(&comment.post_id);
        tables.check(&changes)?;
        tables.comments.push(comment.clone());
        tables.apply(&changes);
        Ok(comment.clone())
    }
}

/// Sorted-set emulation with Redis ordering: by score, then by member.
#[derive(Default)]
pub struct MemoryFeedCache {
    entries: RwLock<HashMap<DbId, HashMap<DbId, i64>>>,
    unavailable: AtomicBool,
}

impl MemoryFeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`CacheError::Unavailable`] and nothing is applied.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), CacheError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    /// Every member of `owner`'s entry, highest score first.
    pub async fn members(&self, owner: &DbId) -> Vec<(DbId, i64)> {
        let entries = self.entries.read().await;
        entries
            .get(owner)
            .map(ranked_desc)
            .unwrap_or_default()
    }
}

fn ranked_desc(entry: &HashMap<DbId, i64>) -> Vec<(DbId, i64)> {
    let mut members: Vec<(DbId, i64)> = entry
        .iter()
        .map(|(id, score)| (id.clone(), *score))
        .collect();
    members.sort_by(|(a_id, a_score), (b_id, b_score)| (b_score, b_id).cmp(&(a_score, a_id)));
    members
}

#[async_trait]
impl FeedCache for MemoryFeedCache {
    async fn execute(&self, batch: &FeedBatch) -> Result<(), CacheError> {
        self.ensure_available()?;
        let mut entries = self.entries.write().await;
        for op in batch.ops() {
            match op {
                FeedOp::Add {
                    owner,
                    post_id,
                    score,
                } => {
                    entries
                        .entry(owner.clone())
                        .or_default()
                        .insert(post_id.clone(), *score);
                }
                FeedOp::Trim { owner, keep } => {
                    if let Some(entry) = entries.get_mut(owner) {
                        if entry.len() > *keep {
                            for (id, _) in ranked_desc(entry).into_iter().skip(*keep) {
                                entry.remove(&id);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn range(
        &self,
        owner: &DbId,
        max_score: i64,
        count: usize,
    ) -> Result<Vec<DbId>, CacheError> {
        self.ensure_available()?;
        Ok(self
            .members(owner)
            .await
            .into_iter()
            .filter(|(_, score)| *score <= max_score)
            .take(count)
            .map(|(id, _)| id)
            .collect())
    }

    async fn len(&self, owner: &DbId) -> Result<usize, CacheError> {
        self.ensure_available()?;
        let entries = self.entries.read().await;
        Ok(entries.get(owner).map(HashMap::len).unwrap_or(0))
    }
}
