use async_trait::async_trait;
use diesel_async::{
    pooled_connection::deadpool::{Object, Pool},
    AsyncConnection, AsyncPgConnection,
};
use scoped_futures::ScopedFutureExt;

use crate::{
    counters,
    models::{Comment, Follow, Like, Post, User},
    store::{EdgeChange, PostDetails, Store, StoreError},
    types::DbId,
};

/// PostgreSQL-backed [`Store`], sharing one deadpool connection pool across requests.
#[derive(Clone)]
pub struct PgStore {
    db_pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn new(db_pool: Pool<AsyncPgConnection>) -> Self {
        PgStore { db_pool }
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        self.db_pool.get().await.map_err(StoreError::failure)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &User) -> Result<User, StoreError> {
        let mut conn = self.conn().await?;
        Ok(User::create(user, &mut conn).await?)
    }

    async fn user_by_id(&self, id: &DbId) -> Result<Option<User>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(User::by_id(id, &mut conn).await?)
    }

    async fn create_post(&self, post: &Post) -> Result<Post, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move { Ok(Post::create(post, conn).await?) }.scope_boxed()
        })
        .await
    }

    async fn posts_by_ids(&self, ids: &[DbId]) -> Result<Vec<(Post, User)>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Post::by_ids_with_author(ids, &mut conn).await?)
    }

    async fn post_details(
        &self,
        id: &DbId,
        recent_comments: i64,
    ) -> Result<Option<PostDetails>, StoreError> {
        let mut conn = self.conn().await?;
        let Some((post, author)) = Post::with_author(id, &mut conn).await? else {
            return Ok(None);
        };
        let comments = Comment::recent_for_post(&post.id, recent_comments, &mut conn).await?;

        Ok(Some(PostDetails {
            post,
            author,
            comments,
        }))
    }

    async fn follower_ids(&self, user_id: &DbId) -> Result<Vec<DbId>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Follow::follower_ids(user_id, &mut conn).await?)
    }

    async fn insert_follow(&self, follow: &Follow) -> Result<EdgeChange, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                if !Follow::create(follow, conn).await? {
                    return Ok(EdgeChange::Unchanged);
                }
                counters::apply(
                    &counters::for_follow(&follow.follower_id, &follow.following_id, 1),
                    conn,
                )
                .await?;
                Ok(EdgeChange::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_follow(
        &self,
        follower_id: &DbId,
        following_id: &DbId,
    ) -> Result<EdgeChange, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                if !Follow::delete(follower_id, following_id, conn).await? {
                    return Ok(EdgeChange::Unchanged);
                }
                counters::apply(&counters::for_follow(follower_id, following_id, -1), conn)
                    .await?;
                Ok(EdgeChange::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    async fn insert_like(&self, like: &Like) -> Result<EdgeChange, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                if !Like::create(like, conn).await? {
                    return Ok(EdgeChange::Unchanged);
                }
                counters::apply(&counters::for_like(&like.post_id, 1), conn).await?;
                Ok(EdgeChange::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_like(
        &self,
        user_id: &DbId,
        post_id: &DbId,
    ) -> Result<EdgeChange, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                if !Like::delete(user_id, post_id, conn).await? {
                    return Ok(EdgeChange::Unchanged);
                }
                counters::apply(&counters::for_like(post_id, -1), conn).await?;
                Ok(EdgeChange::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    async fn create_comment(&self, comment: &Comment) -> Result<Comment, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                let comment = Comment::create(comment, conn).await?;
                counters::apply(&counters::for_comment(&comment.post_id), conn).await?;
                Ok(comment)
            }
            .scope_boxed()
        })
        .await
    }
}
