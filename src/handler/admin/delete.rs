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

    //finding the comment
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

    // Replies are not cascaded here; one call, one delete.
    let result = collection.delete_one(doc!{ "uuid": &comment_id }).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    if result.unwrap().deleted_count == 0 {
        return Ok(Response::not_found("comment not found"));
    }

    // The slug is only needed when the public page has to refresh.
    let slug = match comment.is_approved {
        true => revalidate::post_slug(&db, &comment.post_id).await,
        false => None,
    };

    for path in invalidation_paths(comment.is_approved, slug.as_deref()) {
        revalidate::invalidate(&path).await;
    }

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Successfully Deleted".to_string() }
    ))
}

// An unapproved comment was never publicly visible, so deleting one only
// leaves the admin listing stale; an approved one also invalidates its post
// page, when the slug could be resolved.
fn invalidation_paths(was_approved: bool, slug: Option<&str>) -> Vec<String> {
    let mut paths = Vec::new();

    if was_approved {
        if let Some(slug) = slug {
            paths.push(format!("/blog/{slug}"));
        }
    }

    paths.push(revalidate::ADMIN_COMMENTS_PATH.to_string());
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_delete_refreshes_post_page_and_admin_listing() {
        assert_eq!(
            invalidation_paths(true, Some("meu-post")),
            vec!["/blog/meu-post".to_string(), "/admin/comments".to_string()],
        );
    }

    #[test]
    fn unapproved_delete_refreshes_only_the_admin_listing() {
        assert_eq!(
            invalidation_paths(false, None),
            vec!["/admin/comments".to_string()],
        );
    }

    #[test]
    fn unresolvable_slug_skips_the_post_page() {
        assert_eq!(
            invalidation_paths(true, None),
            vec!["/admin/comments".to_string()],
        );
    }

    #[test]
    fn slug_for_an_unapproved_comment_is_ignored() {
        assert_eq!(
            invalidation_paths(false, Some("meu-post")),
            vec!["/admin/comments".to_string()],
        );
    }
}
