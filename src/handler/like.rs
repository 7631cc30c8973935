pub mod toggle;
pub use toggle as Toggle;

pub mod status;
pub use status as Status;
