use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::feed::BatchFeed;
use crate::repository::DieselRepository;
use crate::services::ServiceError;

pub mod batches;
pub mod calculators;

/// Repository shared by all handlers: SQLite storage behind the change feed.
pub type AppRepository = BatchFeed<DieselRepository>;

/// Mount every API route under the current scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(batches::api_v1_batches)
        .service(batches::api_v1_create_batch)
        .service(batches::api_v1_preview_batch)
        .service(batches::api_v1_update_batch_status)
        .service(calculators::api_v1_density)
        .service(calculators::api_v1_potential_abv)
        .service(calculators::api_v1_chaptalization)
        .service(calculators::api_v1_sulfitation)
        .service(calculators::api_v1_yield);
}

/// Translate a service failure into the matching HTTP response.
pub fn error_response(error: ServiceError) -> HttpResponse {
    match error {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({ "error": message })),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
