use std::io::{Error, ErrorKind};

use actix_web::web::Path;
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::app::config::AppConfig;
use crate::app::repository::traits::RecordSource;
use crate::app::services::record_service::{get_auction, get_campaign, is_valid_key};

fn error_response(message: &str, e: Error) -> HttpResponse {
    let body = json!({
        "message": message,
        "Error": e.to_string()
    });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

/// Get a campaign by its mapping key
///
/// # API Endpoint
/// ```not_rust
/// GET /campaign/{id}
/// ```
///
/// # Path Parameters
///
/// - `id`: the mapping key literal, e.g. `12field`
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// {
///   "id": "12field",
///   "creator": "aleo1...",
///   "title": "Fund the bridge",
///   "metadataCid": "bafybei...",
///   "optionCount": 3,
///   "totalVotes": 42,
///   "endBlock": 900,
///   "active": true
/// }
/// ```
///
/// ## Error Responses
///
/// - 400 when the id is not a valid key
/// - 404 when the key is absent or the stored struct is empty
/// - 502 when the node could not be reached
#[get("/campaign/{id}")]
pub async fn find_campaign(
    source: web::Data<dyn RecordSource>,
    config: web::Data<AppConfig>,
    path: Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    if !is_valid_key(&id) {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid id" }));
    }
    match get_campaign(source, config, &id).await {
        Ok(campaign) => HttpResponse::Ok().json(campaign),
        Err(e) => error_response("Failed to get campaign", e),
    }
}

/// Get an auction by its mapping key
///
/// ```not_rust
/// GET /auction/{id}
/// ```
///
/// Errors are the same as for `/campaign/{id}`.
#[get("/auction/{id}")]
pub async fn find_auction(
    source: web::Data<dyn RecordSource>,
    config: web::Data<AppConfig>,
    path: Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    if !is_valid_key(&id) {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid id" }));
    }
    match get_auction(source, config, &id).await {
        Ok(auction) => HttpResponse::Ok().json(auction),
        Err(e) => error_response("Failed to get auction", e),
    }
}
