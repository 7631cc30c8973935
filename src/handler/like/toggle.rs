use chrono::Utc;
use serde_json::json;
use mongodb::Database;
use mongodb::bson::doc;
use crate::BuiltIns::mongo::MongoDB;
use serde::{ Serialize, Deserialize };
use crate::utils::response::Response;
use actix_web::{web, Error, HttpResponse, HttpRequest};
use crate::middleware::auth::{require_access, AccessRequirement};
use crate::model::{
    Comment::CommentCore,
    Like::{ LikeRecord, LikeTarget },
    Post::PostRef,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    target_id: String,
    target_type: LikeTarget,
}

pub async fn task(
    req: HttpRequest,
    form_data: web::Json<ReqBody>
) -> Result<HttpResponse, Error> {
    let user = require_access(&req, AccessRequirement::AnyToken)?;

    let user_id = user.user_id;

    if form_data.target_id.len() == 0 {
        return Ok(Response::bad_request("target id required"));
    }

    let (db, mut session) = MongoDB.connect_acid().await;

    // Existence pre-check, outside the transaction.
    if let Err(response) = check_target_exists(&db, &form_data).await {
        return Ok(response);
    }

    /* DATABASE ACID SESSION INIT */
    if let Err(error) = session.start_transaction().await {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    let filter = doc!{
        "target_id": &form_data.target_id,
        "target_type": form_data.target_type.to_string(),
        "liked_by": &user_id,
    };

    let collection = db.collection::<LikeRecord>("like");
    let result = collection
        .find_one(filter.clone())
        .session(&mut session)
        .await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        session.abort_transaction().await.ok();
        return Ok(Response::internal_server_error());
    }

    let liked = match result.unwrap() {
        // Second toggle: drop the like row.
        Some(_) => {
            let result = collection
                .delete_one(filter.clone())
                .session(&mut session)
                .await;

            if let Err(error) = result {
                log::error!("{:?}", error);
                session.abort_transaction().await.ok();
                return Ok(Response::internal_server_error());
            }

            false
        }
        // First toggle: record the like.
        None => {
            let like = LikeRecord {
                target_id: form_data.target_id.clone(),
                target_type: form_data.target_type.clone(),
                liked_by: user_id.clone(),
                liked_at: Utc::now().timestamp_millis(),
            };

            let result = collection
                .insert_one(like)
                .session(&mut session)
                .await;

            match result {
                Ok(_) => true,
                // A concurrent toggle from the same actor won the insert.
                // The unique index decided; report the state it enforced,
                // the winner's write already covers the cached counter.
                Err(error) if is_duplicate_key(&error) => {
                    session.abort_transaction().await.ok();

                    let like_count = match count_likes(&db, &form_data).await {
                        Ok(count) => count,
                        Err(response) => return Ok(response),
                    };

                    return Ok(
                        HttpResponse::Ok()
                        .content_type("application/json")
                        .json(json!({
                            "liked": true,
                            "like_count": like_count,
                        }))
                    );
                }
                Err(error) => {
                    log::error!("{:?}", error);
                    session.abort_transaction().await.ok();
                    return Ok(Response::internal_server_error());
                }
            }
        }
    };

    // Comments carry a cached counter; post rows belong to the platform and
    // only get the derived count.
    if let LikeTarget::Comment = form_data.target_type {
        let (filter, delta): (_, i64) = match liked {
            true => (doc!{ "uuid": &form_data.target_id }, 1),
            // Never decrement below zero.
            false => (
                doc!{ "uuid": &form_data.target_id, "like_count": { "$gt": 0 } },
                -1,
            ),
        };

        let collection = db.collection::<CommentCore>("comment_core");
        let result = collection
            .update_one(
                filter,
                doc!{ "$inc": { "like_count": delta } },
            )
            .session(&mut session)
            .await;

        if let Err(error) = result {
            log::error!("{:?}", error);
            session.abort_transaction().await.ok();
            return Ok(Response::internal_server_error());
        }
    }

    /* DATABASE ACID COMMIT */
    if let Err(error) = session.commit_transaction().await {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error());
    }

    let like_count = match count_likes(&db, &form_data).await {
        Ok(count) => count,
        Err(response) => return Ok(response),
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

// E11000: the unique (target_id, target_type, liked_by) index rejected a
// second like row for the same actor and target.
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match *error.kind {
        mongodb::error::ErrorKind::Write(
            mongodb::error::WriteFailure::WriteError(ref write_error)
        ) => write_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

async fn check_target_exists(
    db: &Database,
    data: &ReqBody,
) -> Result<(), HttpResponse> {
    let result = match data.target_type {
        LikeTarget::Post => {
            let collection = db.collection::<PostRef>("post_core");
            collection
                .find_one(doc!{ "uuid": &data.target_id })
                .await
                .map(|option| option.is_some())
        }
        LikeTarget::Comment => {
            let collection = db.collection::<CommentCore>("comment_core");
            collection
                .find_one(doc!{ "uuid": &data.target_id })
                .await
                .map(|option| option.is_some())
        }
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(Response::not_found("target not found")),
        Err(error) => {
            log::error!("{:?}", error);
            Err(Response::internal_server_error())
        }
    }
}

async fn count_likes(
    db: &Database,
    data: &ReqBody,
) -> Result<i64, HttpResponse> {
    let collection = db.collection::<LikeRecord>("like");
    let result = collection.count_documents(doc!{
        "target_id": &data.target_id,
        "target_type": data.target_type.to_string(),
    }).await;

    match result {
        Ok(count) => Ok(count as i64),
        Err(error) => {
            log::error!("{:?}", error);
            Err(Response::internal_server_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only E11000 write errors may take the already-liked shortcut; anything
    // else must stay on the failure path.
    #[test]
    fn unrelated_errors_are_not_duplicate_keys() {
        let error = mongodb::error::Error::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        assert!(!is_duplicate_key(&error));
    }
}
