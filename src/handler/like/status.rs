use serde_json::json;
use mongodb::bson::doc;
use crate::BuiltIns::mongo::MongoDB;
use serde::{ Serialize, Deserialize };
use crate::utils::response::Response;
use crate::middleware::auth::optional_access;
use actix_web::{ web, Error, HttpResponse, HttpRequest};
use crate::model::Like::{ LikeRecord, LikeTarget };

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Query {
    target_id: String,
    target_type: LikeTarget,
}

// Pure read used to seed client state when it did not arrive with a batched
// parent query. Anonymous callers always read `liked: false`.
pub async fn task(
    req: HttpRequest,
    query: web::Query<Query>
) -> Result<HttpResponse, Error> {
    if query.target_id.len() == 0 {
        return Ok(Response::bad_request("target id required"));
    }

    let db = MongoDB.connect();
    let collection = db.collection::<LikeRecord>("like");

    let result = collection.count_documents(doc!{
        "target_id": &query.target_id,
        "target_type": query.target_type.to_string(),
    }).await;

    let like_count = match result {
        Ok(count) => count as i64,
        Err(error) => {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error());
        }
    };

    let liked = match optional_access(&req) {
        Some(user) => {
            let result = collection.find_one(doc!{
                "target_id": &query.target_id,
                "target_type": query.target_type.to_string(),
                "liked_by": &user.user_id,
            }).await;

            match result {
                Ok(option) => option.is_some(),
                Err(error) => {
                    log::error!("{:?}", error);
                    return Ok(Response::internal_server_error());
                }
            }
        }
        None => false,
    };

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(json!({
            "liked": liked,
            "like_count": like_count,
        }))
    )
}
