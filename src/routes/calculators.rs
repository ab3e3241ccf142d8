use actix_web::{HttpResponse, Responder, get, web};

use crate::forms::calculators::{
    ChaptalizationForm, DensityForm, PotentialAbvForm, SulfitationForm, YieldForm,
};
use crate::routes::error_response;
use crate::services::calculators as service;

#[get("/v1/calculators/density")]
pub async fn api_v1_density(params: web::Query<DensityForm>) -> impl Responder {
    match service::density(params.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[get("/v1/calculators/potential-abv")]
pub async fn api_v1_potential_abv(params: web::Query<PotentialAbvForm>) -> impl Responder {
    match service::potential_abv(params.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[get("/v1/calculators/chaptalization")]
pub async fn api_v1_chaptalization(params: web::Query<ChaptalizationForm>) -> impl Responder {
    match service::chaptalization(params.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[get("/v1/calculators/sulfitation")]
pub async fn api_v1_sulfitation(params: web::Query<SulfitationForm>) -> impl Responder {
    match service::sulfitation(params.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[get("/v1/calculators/yield")]
pub async fn api_v1_yield(params: web::Query<YieldForm>) -> impl Responder {
    match service::juice_yield(params.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}
