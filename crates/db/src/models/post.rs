use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;

use crate::{
    models::User,
    schema::{posts, users},
    types::DbId,
};

#[derive(
    Queryable,
    Insertable,
    Identifiable,
    AsChangeset,
    Selectable,
    Serialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i32,
    pub comment_count: i32,
}

impl Post {
    pub fn new(author_id: DbId, content: String, created_at: DateTime<Utc>) -> Self {
        Post {
            id: DbId::default(),
            author_id,
            content,
            created_at,
            like_count: 0,
            comment_count: 0,
        }
    }

    pub async fn create(post: &Post, conn: &mut AsyncPgConnection) -> QueryResult<Self> {
        insert_into(posts::table)
            .values(post)
            .get_result::<Self>(conn)
            .await
    }

    /// Looks up a batch of posts together with their authors. Ids that no longer resolve are
    /// skipped. Rows come back newest first, ties broken by id.
    pub async fn by_ids_with_author(
        ids: &[DbId],
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<Vec<(Self, User)>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        posts::table
            .inner_join(users::table)
            .filter(posts::id.eq_any(ids.to_vec()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .select((Post::as_select(), User::as_select()))
            .load::<(Self, User)>(conn)
            .await
    }

    pub async fn with_author(
        id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<Option<(Self, User)>> {
        posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id))
            .select((Post::as_select(), User::as_select()))
            .first::<(Self, User)>(conn)
            .await
            .optional()
    }
}
