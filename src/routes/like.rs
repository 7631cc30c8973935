use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/like")
        //Toggle
        .route(
          "",
          web::post().to(Handler::Like::Toggle::task)
        )
        //Status
        .route(
          "",
          web::get().to(Handler::Like::Status::task)
        )
    );
}
