use actix_web::{HttpResponse, Responder, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::forms::batches::{NewBatchForm, UpdateBatchStatusForm};
use crate::routes::{AppRepository, error_response};
use crate::services::batches as service;

#[derive(Deserialize, Debug)]
struct StatusBody {
    status: String,
}

#[get("/v1/batches")]
pub async fn api_v1_batches(repo: web::Data<AppRepository>) -> impl Responder {
    match service::show_batches(repo.get_ref()) {
        Ok(batches) => HttpResponse::Ok().json(batches),
        Err(e) => error_response(e),
    }
}

#[post("/v1/batches")]
pub async fn api_v1_create_batch(
    form: web::Json<NewBatchForm>,
    repo: web::Data<AppRepository>,
) -> impl Responder {
    match service::create_batch(form.into_inner(), repo.get_ref()) {
        Ok(id) => HttpResponse::Created().json(json!({ "id": id })),
        Err(e) => error_response(e),
    }
}

#[post("/v1/batches/preview")]
pub async fn api_v1_preview_batch(form: web::Json<NewBatchForm>) -> impl Responder {
    match service::preview_batch(form.into_inner()) {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => error_response(e),
    }
}

#[put("/v1/batches/{batch_id}/status")]
pub async fn api_v1_update_batch_status(
    batch_id: web::Path<i32>,
    body: web::Json<StatusBody>,
    repo: web::Data<AppRepository>,
) -> impl Responder {
    let form = UpdateBatchStatusForm {
        batch_id: batch_id.into_inner(),
        status: body.into_inner().status,
    };

    match service::update_batch_status(form, repo.get_ref()) {
        Ok(batch) => HttpResponse::Ok().json(batch),
        Err(e) => error_response(e),
    }
}
