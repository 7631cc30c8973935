pub mod create;
pub use create as Create;

pub mod tree;
pub use tree as Tree;
