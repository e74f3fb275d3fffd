pub mod account;
pub mod comment;
pub mod feed;
pub mod outcome;
pub mod post;

pub use account::{Account, Author};
pub use comment::Comment;
pub use feed::Feed;
pub use outcome::Outcome;
pub use post::{Post, PostDetails};
