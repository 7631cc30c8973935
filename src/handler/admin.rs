pub mod list;
pub use list as List;

pub mod approve;
pub use approve as Approve;

pub mod unapprove;
pub use unapprove as Unapprove;

pub mod delete;
pub use delete as Delete;
