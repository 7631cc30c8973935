use std::collections::{HashMap, HashSet};

use futures_util::TryStreamExt;
use mongodb::{bson::doc, Database};

use crate::model::Account::AuthorProjection;

// One batched profile lookup for a set of comment owners. A failed or partial
// lookup degrades to fewer resolved entries, never to a failed read.
pub async fn resolve_authors(
    db: &Database,
    ids: &HashSet<String>,
) -> HashMap<String, AuthorProjection> {
    let mut authors = HashMap::new();

    if ids.is_empty() {
        return authors;
    }

    let id_list: Vec<String> = ids.iter().cloned().collect();

    let collection = db.collection::<AuthorProjection>("account_profile");
    let result = collection.find(doc! { "uuid": { "$in": id_list } }).await;

    let mut cursor = match result {
        Ok(cursor) => cursor,
        Err(error) => {
            log::error!("{:?}", error);
            return authors;
        }
    };

    loop {
        match cursor.try_next().await {
            Ok(Some(profile)) => {
                authors.insert(profile.uuid.clone(), profile);
            }
            Ok(None) => break,
            Err(error) => {
                log::error!("{:?}", error);
                break;
            }
        }
    }

    authors
}

// Every call site gets a fully populated projection; the fallback stands in
// for anything the lookup could not resolve.
pub fn resolve_author_or_fallback(
    owner: &str,
    authors: &HashMap<String, AuthorProjection>,
) -> AuthorProjection {
    match authors.get(owner) {
        Some(author) => author.clone(),
        None => AuthorProjection::fallback(owner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_gets_the_fallback() {
        let authors = HashMap::new();
        let author = resolve_author_or_fallback("ghost", &authors);

        assert_eq!(author.uuid, "ghost");
        assert_eq!(author.first_name, "Usuário");
        assert_eq!(author.last_name, "Desconhecido");
        assert!(author.avatar_url.is_none());
    }

    #[test]
    fn resolved_profile_is_returned_as_is() {
        let mut authors = HashMap::new();
        authors.insert(
            "u1".to_string(),
            AuthorProjection {
                uuid: "u1".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Silva".to_string(),
                avatar_url: Some("https://cdn.example/a.webp".to_string()),
            },
        );

        let author = resolve_author_or_fallback("u1", &authors);
        assert_eq!(author.first_name, "Ana");
        assert_eq!(
            author.avatar_url.as_deref(),
            Some("https://cdn.example/a.webp")
        );
    }
}
