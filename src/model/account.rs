use serde::{Deserialize, Serialize};

//role for account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AccountRole { Administrator, User }
impl std::fmt::Display for AccountRole {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt,"{:?}", self)
    }
}

//account_profile (owned by the platform, read only here)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorProjection {
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl AuthorProjection {
    //placeholder shown when the real profile cannot be resolved
    pub fn fallback(uuid: &str) -> AuthorProjection {
        AuthorProjection {
            uuid: uuid.to_string(),
            first_name: "Usuário".to_string(),
            last_name: "Desconhecido".to_string(),
            avatar_url: None,
        }
    }
}
