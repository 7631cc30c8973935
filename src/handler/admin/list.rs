use std::collections::{HashMap, HashSet};

use serde_json::json;
use futures_util::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{ doc, Document };
use crate::BuiltIns::mongo::MongoDB;
use serde::{ Serialize, Deserialize };
use crate::utils::response::Response;
use crate::utils::mongo::find_with_pagination;
use actix_web::{ web, Error, HttpResponse, HttpRequest};
use crate::middleware::auth::{require_access, AccessRequirement};
use crate::utils::authors::{resolve_authors, resolve_author_or_fallback};
use crate::model::{
    Account::{ AccountRole, AuthorProjection },
    Comment::CommentCore,
    Post::PostRef,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter { Pending, Approved, All }

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Query {
    status: Option<StatusFilter>,
    post_id: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AdminCommentInfo {
    pub uuid: String,
    pub text: String,
    pub parent_id: Option<String>,
    pub is_approved: bool,
    pub like_count: i64,
    pub created_at: i64,
    pub author: AuthorProjection,
    pub post: Option<PostRef>,
}

pub async fn task(
    req: HttpRequest,
    query: web::Query<Query>
) -> Result<HttpResponse, Error> {
    require_access(
        &req,
        AccessRequirement::Role(AccountRole::Administrator)
    )?;

    let filter = build_filter(&query);

    let db = MongoDB.connect();
    let collection = db.collection::<CommentCore>("comment_core");

    let result = collection.count_documents(filter.clone()).await;

    let total_count = match result {
        Ok(count) => count,
        Err(error) => {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error());
        }
    };

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20).min(100);

    // Moderators see the newest submissions first.
    let result = find_with_pagination(&collection, filter, false, limit, page).await;

    let mut cursor = match result {
        Ok(cursor) => cursor,
        Err(error) => {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error());
        }
    };

    let mut comments = Vec::new();
    loop {
        match cursor.try_next().await {
            Ok(Some(comment)) => comments.push(comment),
            Ok(None) => break,
            Err(error) => {
                log::error!("{:?}", error);
                return Ok(Response::internal_server_error());
            }
        }
    }

    // One round trip per projection, whatever the page size.
    let owners: HashSet<String> = comments
        .iter()
        .map(|comment| comment.owner.clone())
        .collect();
    let authors = resolve_authors(&db, &owners).await;

    let post_ids: HashSet<String> = comments
        .iter()
        .map(|comment| comment.post_id.clone())
        .collect();
    let posts = resolve_posts(&db, &post_ids).await;

    let items: Vec<AdminCommentInfo> = comments
        .into_iter()
        .map(|comment| AdminCommentInfo {
            author: resolve_author_or_fallback(&comment.owner, &authors),
            post: posts.get(&comment.post_id).cloned(),
            uuid: comment.uuid,
            text: comment.text,
            parent_id: comment.parent_id,
            is_approved: comment.is_approved,
            like_count: comment.like_count,
            created_at: comment.created_at,
        })
        .collect();

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(json!({
            "items": items,
            "total_count": total_count,
        }))
    )
}

fn build_filter(query: &Query) -> Document {
    let mut filter = doc!{};

    match query.status.clone().unwrap_or(StatusFilter::All) {
        StatusFilter::Pending => {
            filter.insert("is_approved", false);
        }
        StatusFilter::Approved => {
            filter.insert("is_approved", true);
        }
        StatusFilter::All => {}
    }

    if let Some(post_id) = &query.post_id {
        if post_id.len() > 0 {
            filter.insert("post_id", post_id.clone());
        }
    }

    filter
}

// Same degradation contract as the author lookup: a failed batch leaves the
// listing without post titles instead of failing it.
async fn resolve_posts(
    db: &Database,
    ids: &HashSet<String>,
) -> HashMap<String, PostRef> {
    let mut posts = HashMap::new();

    if ids.is_empty() {
        return posts;
    }

    let id_list: Vec<String> = ids.iter().cloned().collect();

    let collection = db.collection::<PostRef>("post_core");
    let result = collection.find(doc!{ "uuid": { "$in": id_list } }).await;

    let mut cursor = match result {
        Ok(cursor) => cursor,
        Err(error) => {
            log::error!("{:?}", error);
            return posts;
        }
    };

    loop {
        match cursor.try_next().await {
            Ok(Some(post)) => {
                posts.insert(post.uuid.clone(), post);
            }
            Ok(None) => break,
            Err(error) => {
                log::error!("{:?}", error);
                break;
            }
        }
    }

    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: Option<StatusFilter>, post_id: Option<&str>) -> Query {
        Query {
            status,
            post_id: post_id.map(|p| p.to_string()),
            page: None,
            limit: None,
        }
    }

    #[test]
    fn pending_filter_targets_unapproved_rows() {
        let filter = build_filter(&query(Some(StatusFilter::Pending), None));
        assert_eq!(filter, doc!{ "is_approved": false });
    }

    #[test]
    fn approved_filter_targets_approved_rows() {
        let filter = build_filter(&query(Some(StatusFilter::Approved), None));
        assert_eq!(filter, doc!{ "is_approved": true });
    }

    #[test]
    fn all_is_the_default_and_adds_no_clause() {
        assert_eq!(build_filter(&query(None, None)), doc!{});
        assert_eq!(build_filter(&query(Some(StatusFilter::All), None)), doc!{});
    }

    #[test]
    fn post_id_narrows_the_filter() {
        let filter = build_filter(&query(Some(StatusFilter::Pending), Some("p1")));
        assert_eq!(filter, doc!{ "is_approved": false, "post_id": "p1" });
    }

    #[test]
    fn empty_post_id_is_ignored() {
        let filter = build_filter(&query(None, Some("")));
        assert_eq!(filter, doc!{});
    }
}
