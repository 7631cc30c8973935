pub mod mongo;

pub mod jwt;
