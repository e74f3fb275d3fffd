use std::sync::Arc;

use db::{clock::Clock, feed_cache::FeedCache, store::Store};

use crate::config::Config;

/// Long-lived handles shared by every request. Built once by the process entry point.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub feed_cache: Arc<dyn FeedCache>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}
