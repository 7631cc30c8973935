use mongodb::bson::doc;
use crate::Integrations::revalidate;
use crate::BuiltIns::mongo::MongoDB;
use crate::utils::response::Response;
use actix_web::{web, Error, HttpResponse, HttpRequest};
use crate::model::{ Comment::CommentCore, Account::AccountRole };
use crate::middleware::auth::{require_access, AccessRequirement};

pub async fn task(
    req: HttpRequest,
    comment_id: web::Path<String>
) -> Result<HttpResponse, Error> {
    require_access(
        &req,
        AccessRequirement::Role(AccountRole::Administrator)
    )?;

    let comment_id = comment_id.into_inner();
    if comment_id.len() == 0 {
        return Ok(Response::bad_request("comment id required"));
    }

    let db = MongoDB.connect();

    // Read before write: a missing comment fails without mutating anything.
    let collection = db.collection::<CommentCore>("comment_core");
    let result = collection.find_one(doc!{ "uuid": &comment_id }).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    let option = result.unwrap();
    if let None = option {
        return Ok(Response::not_found("comment not found"));
    }

    let comment = option.unwrap();

    // Idempotent: re-approving an approved comment is a no-op write.
    let result = collection.update_one(
        doc!{ "uuid": &comment_id },
        doc!{ "$set": { "is_approved": true } },
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    // The post page and the moderation listing are both stale now.
    revalidate::invalidate_post_page(&db, &comment.post_id).await;
    revalidate::invalidate(revalidate::ADMIN_COMMENTS_PATH).await;

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Comment approved".to_string() }
    ))
}
