pub mod error;
pub mod fanout;
pub mod feed;
pub mod follows;
pub mod posts;
pub mod users;

pub use error::ServiceError;

#[cfg(test)]
pub(crate) mod testing;
