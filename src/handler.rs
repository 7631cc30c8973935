pub mod comment;
pub use comment as Comment;

pub mod like;
pub use like as Like;

pub mod admin;
pub use admin as Admin;
