use actix_web::{middleware::Logger, App, HttpServer};
use comentarios_backend::builtins::mongo::MongoDB;
use comentarios_backend::{config, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::load();

    MongoDB.init().await;
    MongoDB.ensure_indexes().await;

    log::info!("listening on port {}", config.port);

    HttpServer::new(|| {
        App::new()
            .wrap(Logger::default())
            .configure(routes::Comment::router)
            .configure(routes::Like::router)
            .configure(routes::Admin::router)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
