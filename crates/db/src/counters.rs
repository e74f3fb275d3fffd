//! Denormalized counter maintenance.
//!
//! Counters are never written on their own. Each edge mutation asks this module which counters
//! it moves and applies them on the same connection, inside the same transaction, as the edge
//! itself.

use diesel::{prelude::*, update};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::{
    schema::{posts, users},
    store::StoreError,
    types::DbId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// `users.follower_count`
    Followers,
    /// `users.following_count`
    Following,
    /// `posts.like_count`
    Likes,
    /// `posts.comment_count`
    Comments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterChange {
    pub counter: Counter,
    pub target: DbId,
    pub delta: i32,
}

impl Counter {
    fn table(self) -> &'static str {
        match self {
            Counter::Followers | Counter::Following => "users",
            Counter::Likes | Counter::Comments => "posts",
        }
    }
}

impl CounterChange {
    fn new(counter: Counter, target: &DbId, delta: i32) -> Self {
        CounterChange {
            counter,
            target: target.clone(),
            delta,
        }
    }
}

pub fn for_follow(follower_id: &DbId, following_id: &DbId, delta: i32) -> [CounterChange; 2] {
    [
        CounterChange::new(Counter::Following, follower_id, delta),
        CounterChange::new(Counter::Followers, following_id, delta),
    ]
}

pub fn for_like(post_id: &DbId, delta: i32) -> [CounterChange; 1] {
    [CounterChange::new(Counter::Likes, post_id, delta)]
}

pub fn for_comment(post_id: &DbId) -> [CounterChange; 1] {
    [CounterChange::new(Counter::Comments, post_id, 1)]
}

/// The order rows get locked in: by table, then by id. Concurrent transactions touching the
/// same rows (a follow and its follow-back) then wait on each other instead of deadlocking.
pub fn lock_order(changes: &[CounterChange]) -> Vec<&CounterChange> {
    let mut ordered: Vec<&CounterChange> = changes.iter().collect();
    ordered.sort_by(|a, b| (a.counter.table(), &a.target).cmp(&(b.counter.table(), &b.target)));
    ordered
}

/// Applies `changes` on `conn` in [`lock_order`]. Callers must already be inside a transaction.
/// A change whose target row is missing fails with [`StoreError::NotFound`], which rolls the
/// transaction back.
pub async fn apply(
    changes: &[CounterChange],
    conn: &mut AsyncPgConnection,
) -> Result<(), StoreError> {
    for change in lock_order(changes) {
        let delta = change.delta;
        let rows_affected = match change.counter {
            Counter::Followers => {
                update(users::table.filter(users::id.eq(&change.target)))
                    .set(users::follower_count.eq(users::follower_count + delta))
                    .execute(conn)
                    .await?
            }
            Counter::Following => {
                update(users::table.filter(users::id.eq(&change.target)))
                    .set(users::following_count.eq(users::following_count + delta))
                    .execute(conn)
                    .await?
            }
            Counter::Likes => {
                update(posts::table.filter(posts::id.eq(&change.target)))
                    .set(posts::like_count.eq(posts::like_count + delta))
                    .execute(conn)
                    .await?
            }
            Counter::Comments => {
                update(posts::table.filter(posts::id.eq(&change.target)))
                    .set(posts::comment_count.eq(posts::comment_count + delta))
                    .execute(conn)
                    .await?
            }
        };

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_moves_both_sides() {
        let follower = DbId::from("a");
        let following = DbId::from("b");
        let changes = for_follow(&follower, &following, -1);

        assert_eq!(changes[0].counter, Counter::Following);
        assert_eq!(changes[0].target, follower);
        assert_eq!(changes[1].counter, Counter::Followers);
        assert_eq!(changes[1].target, following);
        assert!(changes.iter().all(|change| change.delta == -1));
    }

    #[test]
    fn follow_and_follow_back_lock_rows_in_the_same_order() {
        let a = DbId::from("a");
        let b = DbId::from("b");

        let forward = for_follow(&a, &b, 1);
        let back = for_follow(&b, &a, 1);
        let targets = |changes: &[CounterChange]| -> Vec<DbId> {
            lock_order(changes)
                .into_iter()
                .map(|change| change.target.clone())
                .collect()
        };

        assert_eq!(targets(&forward), vec![a.clone(), b.clone()]);
        assert_eq!(targets(&back), vec![a, b]);
    }

    #[test]
    fn rows_are_locked_table_by_table() {
        let user = DbId::from("z");
        let post = DbId::from("a");
        let mut changes = for_like(&post, 1).to_vec();
        changes.extend(for_follow(&user, &user, 1));

        let tables: Vec<&str> = lock_order(&changes)
            .into_iter()
            .map(|change| change.counter.table())
            .collect();
        assert_eq!(tables, vec!["posts", "users", "users"]);
    }

    #[test]
    fn comments_only_increment() {
        let post = DbId::from("p");
        assert_eq!(for_comment(&post)[0].delta, 1);
        assert_eq!(for_like(&post, 1)[0].counter, Counter::Likes);
    }
}
