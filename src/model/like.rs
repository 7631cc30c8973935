use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget { Post, Comment }

impl std::fmt::Display for LikeTarget {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LikeTarget::Post => write!(fmt, "post"),
            LikeTarget::Comment => write!(fmt, "comment"),
        }
    }
}

//like
//
// Existence of the row means "liked"; there is no soft delete. The store
// carries a unique index on (target_id, target_type, liked_by).
#[derive(Debug, Deserialize, Serialize)]
pub struct LikeRecord {
    pub target_id: String,
    pub target_type: LikeTarget,
    pub liked_by: String,
    pub liked_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LikeTarget::Post).unwrap(), "\"post\"");
        assert_eq!(
            serde_json::to_string(&LikeTarget::Comment).unwrap(),
            "\"comment\""
        );
    }

    #[test]
    fn target_type_display_matches_wire_form() {
        assert_eq!(LikeTarget::Post.to_string(), "post");
        assert_eq!(LikeTarget::Comment.to_string(), "comment");
    }
}
