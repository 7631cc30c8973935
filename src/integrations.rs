pub mod revalidate;
pub use revalidate as Revalidate;
