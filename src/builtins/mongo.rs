use std::sync::OnceLock;

use mongodb::{
    bson::doc,
    options::IndexOptions,
    Client, ClientSession, Database, IndexModel,
};

use crate::config;
use crate::model::Comment::CommentCore;
use crate::model::Like::LikeRecord;

static CLIENT: OnceLock<Client> = OnceLock::new();

pub struct MongoDB;

impl MongoDB {
    pub async fn init(&self) {
        let config = config::load();
        let client = Client::with_uri_str(&config.mongo_uri)
            .await
            .expect("failed to connect to mongodb");
        CLIENT.set(client).ok();
    }

    pub fn connect(&self) -> Database {
        let config = config::load();
        CLIENT
            .get()
            .expect("mongodb client not initialized")
            .database(&config.mongo_db)
    }

    pub async fn connect_acid(&self) -> (Database, ClientSession) {
        let session = CLIENT
            .get()
            .expect("mongodb client not initialized")
            .start_session()
            .await
            .expect("failed to start mongodb session");

        (self.connect(), session)
    }

    pub async fn ensure_indexes(&self) {
        let db = self.connect();

        // One like per (target, actor) pair; concurrent duplicate toggles are
        // serialized by this constraint, not by the handler.
        let collection = db.collection::<LikeRecord>("like");
        let index = IndexModel::builder()
            .keys(doc! { "target_id": 1, "target_type": 1, "liked_by": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        if let Err(error) = collection.create_index(index).await {
            log::error!("{:?}", error);
        }

        let collection = db.collection::<CommentCore>("comment_core");
        let index = IndexModel::builder()
            .keys(doc! { "post_id": 1, "is_approved": 1, "created_at": 1 })
            .build();

        if let Err(error) = collection.create_index(index).await {
            log::error!("{:?}", error);
        }
    }
}
