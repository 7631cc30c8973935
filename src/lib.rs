pub mod config;

pub mod model;
pub use model as Model;

pub mod routes;
pub use routes as Routes;

pub mod handler;
pub use handler as Handler;

pub mod builtins;
pub use builtins as BuiltIns;

pub mod middleware;
pub use middleware as Middleware;

pub mod integrations;
pub use integrations as Integrations;

pub mod utils;
