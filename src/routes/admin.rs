use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin/comment")
        //Moderation listing
        .route(
          "",
          web::get().to(Handler::Admin::List::task)
        )
        //Approve
        .route(
          "/{uuid}/approve",
          web::patch().to(Handler::Admin::Approve::task)
        )
        //Unapprove
        .route(
          "/{uuid}/unapprove",
          web::patch().to(Handler::Admin::Unapprove::task)
        )
        //Delete
        .route(
          "/{uuid}",
          web::delete().to(Handler::Admin::Delete::task)
        )
    );
}
