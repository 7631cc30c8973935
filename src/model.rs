pub mod account;
pub use account as Account;

pub mod comment;
pub use comment as Comment;

pub mod like;
pub use like as Like;

pub mod post;
pub use post as Post;
