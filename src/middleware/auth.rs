use serde_json::json;
use crate::BuiltIns::jwt;
use crate::model::Account::AccountRole;
use actix_web::{ Error, HttpRequest};

#[derive(Debug, Clone)]
pub enum AccessRequirement {
    AnyToken,
    Role(AccountRole),
}

#[derive(Debug)]
pub struct User {
    pub user_id: String,
    pub role: AccountRole,
}

pub fn require_access(
    req: &HttpRequest,
    requirement: AccessRequirement,
) -> Result<User, Error> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    if auth_header.is_none() {
        return Err(actix_web::error::ErrorUnauthorized(
            json!({ "message": "Missing authorization header" }),
        ));
    }

    let token = auth_header
        .unwrap()
        .trim_start_matches("Bearer ")
        .to_string();

    // Validate access token
    let claims = jwt::access_token::verify(&token)
        .map_err(|err| {
            log::error!("{:?}", err);
            actix_web::error::ErrorUnauthorized(
                json!({ "message": "Invalid authorization token" }),
            )
        })?;

    let pass = match &requirement {
        AccessRequirement::AnyToken => true,
        AccessRequirement::Role(r) => &claims.role == r,
    };

    if !pass {
        return Err(actix_web::error::ErrorForbidden(
            json!({ "message": "Not authorized to perform this action" }),
        ));
    }

    Ok(User {
        user_id: claims.sub,
        role: claims.role,
    })
}

// Public reads that personalize when a token is present. A malformed or
// expired token behaves like no token at all.
pub fn optional_access(req: &HttpRequest) -> Option<User> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.trim_start_matches("Bearer ");

    let claims = jwt::access_token::verify(token).ok()?;

    Some(User {
        user_id: claims.sub,
        role: claims.role,
    })
}
