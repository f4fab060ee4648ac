use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dal::search_db,
    domain::search::SearchRequest,
    routes::AuthenticatedUser,
    services::{quota, GooglePlacesClient, SearchOrchestrator},
};

#[post("")]
async fn search(
    user: AuthenticatedUser,
    body: web::Json<SearchRequest>,
    orchestrator: web::Data<SearchOrchestrator<GooglePlacesClient>>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    let quota_status = match quota::check_quota(user.0, &pool).await {
        Ok(Some(status)) => status,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(json!({ "error": "Unknown user" }));
        }
        Err(e) => {
            log::error!("Failed to check quota for {}: {:?}", user.0, e);
            return HttpResponse::InternalServerError().json(json!({ "error": "Search failed" }));
        }
    };

    if !quota_status.has_quota {
        return HttpResponse::Forbidden().json(json!({
            "error": "Quota exceeded",
            "quota": quota_status,
        }));
    }

    let outcome = orchestrator.run(&body).await;

    if let Err(e) = quota::consume_request(user.0, &pool).await {
        log::error!("Failed to consume quota for {}: {:?}", user.0, e);
        return HttpResponse::InternalServerError().json(json!({ "error": "Search failed" }));
    }

    let search_id =
        match search_db::insert_search_with_results(user.0, &body, &outcome.prospects, &pool).await
        {
            Ok(search_id) => search_id,
            Err(e) => {
                log::error!("Failed to persist search for {}: {:?}", user.0, e);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": "Search failed" }));
            }
        };

    HttpResponse::Ok().json(json!({
        "searchId": search_id,
        "count": outcome.prospects.len(),
        "prospects": outcome.prospects,
        "stats": outcome.stats,
    }))
}

#[get("/history")]
async fn history(user: AuthenticatedUser, pool: web::Data<PgPool>) -> HttpResponse {
    match search_db::get_search_history(user.0, &pool).await {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(e) => {
            log::error!("Failed to load search history for {}: {:?}", user.0, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to load history" }))
        }
    }
}

#[get("/{search_id}")]
async fn results(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    let search_id = path.into_inner();
    match search_db::get_search_results(search_id, user.0, &pool).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to load results of search {}: {:?}", search_id, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to load results" }))
        }
    }
}
