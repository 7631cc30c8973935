use serde::{Deserialize, Serialize};

//comment_core
//
// `text` is plain text, markup is stripped before insert. `is_approved` is
// written only by the moderation handlers and `like_count` only by the like
// handlers; everything else is immutable after creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentCore {
    pub uuid: String,
    pub post_id: String,
    pub owner: String,

    pub text: String,
    pub parent_id: Option<String>,

    pub is_approved: bool,
    pub like_count: i64,

    pub created_at: i64,
}
