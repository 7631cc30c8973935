use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/comment")
        //Create
        .route(
          "",
          web::post().to(Handler::Comment::Create::task)
        )
        //Public tree
        .route(
          "/tree/{post_id}",
          web::get().to(Handler::Comment::Tree::task)
        )
    );
}
