use uuid::Uuid;
use chrono::Utc;
use serde_json::json;
use mongodb::bson::doc;
use crate::utils::sanitize;
use crate::BuiltIns::mongo::MongoDB;
use serde::{ Serialize, Deserialize };
use crate::utils::response::Response;
use crate::model::{ Comment, Post };
use actix_web::{web, Error, HttpResponse, HttpRequest};
use crate::middleware::auth::{require_access, AccessRequirement};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    post_id: String,
    text: String,
    parent_id: Option<String>,
}

pub async fn task(
    req: HttpRequest,
    form_data: web::Json<ReqBody>
) -> Result<HttpResponse, Error> {
    let user = require_access(&req, AccessRequirement::AnyToken)?;

    let user_id = user.user_id;

    if let Err(res) = check_empty_fields(&form_data) {
        return Ok(Response::bad_request(&res));
    }

    // Markup never reaches the store, comments are plain text only.
    let text = sanitize::strip_markup(&form_data.text);
    if text.trim().len() == 0 {
        return Ok(Response::bad_request("Nothing to comment here"));
    }

    let db = MongoDB.connect();

    //finding the owning post
    let collection = db.collection::<Post::PostRef>("post_core");
    let result = collection.find_one(doc!{ "uuid": &form_data.post_id }).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    if let None = result.unwrap() {
        return Ok(Response::not_found("post not found"));
    }

    // A reply must point at a comment on the same post.
    if let Some(parent_id) = &form_data.parent_id {
        let collection = db.collection::<Comment::CommentCore>("comment_core");
        let result = collection.find_one(doc!{ "uuid": parent_id }).await;

        if let Err(error) = result {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error());
        }

        let option = result.unwrap();
        if let None = option {
            return Ok(Response::bad_request("parent comment not found"));
        }

        let parent = option.unwrap();
        if parent.post_id != form_data.post_id {
            return Ok(Response::bad_request(
                "parent comment belongs to another post"
            ));
        }
    }

    let comment_id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();

    // insert comment core, unapproved until a moderator acts
    let collection = db.collection::<Comment::CommentCore>("comment_core");
    let comment_core = Comment::CommentCore {
        uuid: comment_id.clone(),
        post_id: form_data.post_id.clone(),
        owner: user_id,
        text,
        parent_id: form_data.parent_id.clone(),
        is_approved: false,
        like_count: 0,
        created_at: now,
    };

    let result = collection.insert_one(comment_core).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(json!({
            "uuid": &comment_id
        }))
    )
}

fn check_empty_fields(data: &ReqBody) -> Result<(), String> {
    if data.post_id.len() == 0 {
        Err("Post id required".to_string())
    }
    else if data.text.trim().len() == 0 {
        Err("Nothing to comment here".to_string())
    }
    else {
        Ok(())
    }
}
