pub mod response;

pub mod mongo;

pub mod sanitize;

pub mod authors;
