use std::future::{ready, Ready};

use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest};
use uuid::Uuid;

pub mod default_route;
pub mod search_route;
pub mod user_route;

/// Identity established by the upstream auth layer, carried in the
/// `X-User-Id` header. Requests without a valid uuid there are rejected.
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        ready(match user_id {
            Some(id) => Ok(AuthenticatedUser(id)),
            None => Err(ErrorUnauthorized("missing or invalid user identity")),
        })
    }
}
