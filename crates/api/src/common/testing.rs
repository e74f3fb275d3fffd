use std::sync::Arc;

use db::{
    clock::ManualClock,
    memory::{MemoryFeedCache, MemoryStore},
    models::User,
    store::Store,
};
use web::{
    config::{Config, Database, Feed, Redis, Web},
    AppState,
};

use super::users;

pub(crate) struct Harness {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryFeedCache>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemoryFeedCache::new());
        let clock = Arc::new(ManualClock::new(0));
        let config = Config {
            web: Web {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: Database {
                uri: "postgres://unused".to_string(),
            },
            redis: Redis {
                uri: "redis://unused".to_string(),
            },
            feed: Feed::default(),
        };
        let state = Arc::new(AppState {
            store: store.clone(),
            feed_cache: cache.clone(),
            clock: clock.clone(),
            config,
        });

        Harness {
            state,
            store,
            cache,
            clock,
        }
    }

    pub async fn user(&self, name: &str) -> User {
        users::create_user(name, &self.state).await.unwrap()
    }

    /// Fresh copy of `user` from the store, counters included.
    pub async fn reload(&self, user: &User) -> User {
        self.store.user_by_id(&user.id).await.unwrap().unwrap()
    }
}
