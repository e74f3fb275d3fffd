use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;

use crate::{schema::users, types::DbId};

#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Insertable,
    AsChangeset,
    Serialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
)]
#[diesel(table_name = users)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, created_at: DateTime<Utc>) -> Self {
        User {
            id: DbId::default(),
            username,
            follower_count: 0,
            following_count: 0,
            created_at,
        }
    }

    pub async fn create(user: &User, conn: &mut AsyncPgConnection) -> QueryResult<Self> {
        insert_into(users::table)
            .values(user)
            .get_result::<Self>(conn)
            .await
    }

    pub async fn by_id(id: &DbId, conn: &mut AsyncPgConnection) -> QueryResult<Option<Self>> {
        let user = users::table
            .filter(users::id.eq(id))
            .first::<Self>(conn)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
