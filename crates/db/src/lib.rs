#![forbid(unsafe_code)]

pub mod clock;
pub mod counters;
pub mod feed_cache;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod pg;
pub mod schema;
pub mod store;
pub mod types;
