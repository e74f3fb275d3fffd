use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::{schema::follows, types::DbId};

#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = follows)]
pub struct Follow {
    pub follower_id: DbId,
    pub following_id: DbId,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Returns false when the edge was already there.
    pub async fn create(follow: &Follow, conn: &mut AsyncPgConnection) -> QueryResult<bool> {
        let rows_affected = insert_into(follows::table)
            .values(follow)
            .on_conflict((follows::follower_id, follows::following_id))
            .do_nothing()
            .execute(conn)
            .await?;

        Ok(rows_affected == 1)
    }

    pub async fn delete(
        follower_id: &DbId,
        following_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<bool> {
        let rows_affected = delete(
            follows::table
                .filter(follows::follower_id.eq(follower_id))
                .filter(follows::following_id.eq(following_id)),
        )
        .execute(conn)
        .await?;

        Ok(rows_affected == 1)
    }

    /// Ids of every account following `user_id`.
    pub async fn follower_ids(
        user_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> QueryResult<Vec<DbId>> {
        follows::table
            .filter(follows::following_id.eq(user_id))
            .select(follows::follower_id)
            .load::<DbId>(conn)
            .await
    }
}
