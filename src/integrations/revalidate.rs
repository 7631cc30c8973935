use mongodb::{bson::doc, Database};
use serde_json::json;

use crate::config;
use crate::model::Post::PostRef;

pub const ADMIN_COMMENTS_PATH: &str = "/admin/comments";

// Asks the frontend to re-render a cached page. A failed invalidation leaves
// a stale page behind until the next successful one; it is logged and never
// fails the calling operation.
pub async fn invalidate(path: &str) {
    let config = config::load();

    let url = match &config.revalidate_url {
        Some(url) => url.clone(),
        None => {
            log::warn!("REVALIDATE_URL not set, skipping invalidation of {}", path);
            return;
        }
    };

    let mut request = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "path": path }));

    if let Some(secret) = &config.revalidate_secret {
        request = request.header("x-revalidate-secret", secret.as_str());
    }

    match request.send().await {
        Ok(response) if response.status().is_success() => {}
        Ok(response) => {
            log::warn!("invalidation of {} answered {}", path, response.status());
        }
        Err(error) => {
            log::warn!("invalidation of {} failed: {:?}", path, error);
        }
    }
}

// Public post pages are addressed by slug, not id.
pub async fn post_slug(db: &Database, post_id: &str) -> Option<String> {
    let collection = db.collection::<PostRef>("post_core");

    match collection.find_one(doc! { "uuid": post_id }).await {
        Ok(Some(post)) => Some(post.slug),
        Ok(None) => {
            log::warn!("post {} not found for invalidation", post_id);
            None
        }
        Err(error) => {
            log::error!("{:?}", error);
            None
        }
    }
}

// Resolves the post slug and invalidates its public page.
pub async fn invalidate_post_page(db: &Database, post_id: &str) {
    if let Some(slug) = post_slug(db, post_id).await {
        invalidate(&format!("/blog/{slug}")).await;
    }
}
