use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response {
    pub message: String,
}

impl Response {
    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(Response {
            message: message.to_string(),
        })
    }

    pub fn unauthorized(message: &str) -> HttpResponse {
        HttpResponse::Unauthorized().json(Response {
            message: message.to_string(),
        })
    }

    pub fn forbidden(message: &str) -> HttpResponse {
        HttpResponse::Forbidden().json(Response {
            message: message.to_string(),
        })
    }

    pub fn not_found(message: &str) -> HttpResponse {
        HttpResponse::NotFound().json(Response {
            message: message.to_string(),
        })
    }

    // Store errors are logged in full at the call site; the caller only ever
    // sees this generic message.
    pub fn internal_server_error() -> HttpResponse {
        HttpResponse::InternalServerError().json(Response {
            message: "Something went wrong, try again later".to_string(),
        })
    }
}
