use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{dal::user_db, routes::AuthenticatedUser, services::quota};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub plan_type: Option<String>,
}

/// Creates the account row the quota and search flows key on. Credentials
/// live in the upstream auth layer; only the email and plan are stored here.
#[post("")]
async fn register(body: web::Json<RegisterRequest>, pool: web::Data<PgPool>) -> HttpResponse {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid email" }));
    }

    let plan_type = body.plan_type.as_deref().unwrap_or("free").to_string();
    let request_limit = quota::request_limit_for_plan(&plan_type);

    match user_db::insert_user(&email, &plan_type, request_limit, &pool).await {
        Ok(user_id) => HttpResponse::Created().json(json!({
            "userId": user_id,
            "email": email,
            "planType": plan_type,
            "requestLimit": request_limit,
        })),
        Err(e) if e.as_database_error().map_or(false, |db| db.is_unique_violation()) => {
            HttpResponse::Conflict().json(json!({ "error": "Email already registered" }))
        }
        Err(e) => {
            log::error!("Failed to create user {}: {:?}", email, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create user" }))
        }
    }
}

#[get("/quota")]
async fn quota_status(user: AuthenticatedUser, pool: web::Data<PgPool>) -> HttpResponse {
    match quota::check_quota(user.0, &pool).await {
        Ok(Some(status)) => HttpResponse::Ok().json(status),
        Ok(None) => HttpResponse::Unauthorized().json(json!({ "error": "Unknown user" })),
        Err(e) => {
            log::error!("Failed to load quota for {}: {:?}", user.0, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to load quota" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RegisterRequest;

    #[test]
    fn register_request_parses_with_an_optional_plan() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email": "jean@acme.fr"}"#).unwrap();
        assert_eq!(request.email, "jean@acme.fr");
        assert!(request.plan_type.is_none());

        let request: RegisterRequest =
            serde_json::from_str(r#"{"email": "jean@acme.fr", "planType": "pro"}"#).unwrap();
        assert_eq!(request.plan_type.as_deref(), Some("pro"));
    }
}
