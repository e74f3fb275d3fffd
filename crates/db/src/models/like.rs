use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::{schema::likes, types::DbId};

#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = likes)]
pub struct Like {
    pub user_id: DbId,
    pub post_id: DbId,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Returns false when the user had already liked the post.
    pub async fn create(like: &Like, conn: &mut AsyncPgConnection) -> QueryResult<bool> {
        let rows_affected = insert_into(likes::table)
            .values(like)
            .on_conflict((likes::user_id, likes::post_id))
            .do_nothing()
            .execute(conn)
            .await?;

        Ok(rows_affected == 1)
    }

    pub async fn delete(
        user_id: &DbId,
        post_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<bool> {
        let rows_affected = delete(
            likes::table
                .filter(likes::user_id.eq(user_id))
                .filter(likes::post_id.eq(post_id)),
        )
        .execute(conn)
        .await?;

        Ok(rows_affected == 1)
    }
}
