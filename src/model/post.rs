use serde::{Deserialize, Serialize};

//post_core (owned by the platform, read only here)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostRef {
    pub uuid: String,
    pub slug: String,
    pub title: String,
}
