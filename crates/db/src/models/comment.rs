use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;

use crate::{schema::comments, types::DbId};

#[derive(Queryable, Insertable, Selectable, Serialize, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: DbId, user_id: DbId, content: String, created_at: DateTime<Utc>) -> Self {
        Comment {
            id: DbId::default(),
            post_id,
            user_id,
            content,
            created_at,
        }
    }

    pub async fn create(comment: &Comment, conn: &mut AsyncPgConnection) -> QueryResult<Self> {
        insert_into(comments::table)
            .values(comment)
            .get_result::<Self>(conn)
            .await
    }

    pub async fn recent_for_post(
        post_id: &DbId,
        limit: i64,
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<Vec<Self>> {
        comments::table
            .filter(comments::post_id.eq(post_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .limit(limit)
            .load::<Self>(conn)
            .await
    }
}
