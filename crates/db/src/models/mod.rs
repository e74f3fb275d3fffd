pub mod comment;
pub mod follow;
pub mod like;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use follow::Follow;
pub use like::Like;
pub use post::Post;
pub use user::User;
