use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use tracing::error;

use crate::collector::Collector;

pub const HEALTH_MESSAGE: &str = "NYC Movie Showtimes API is running.";

pub struct AppState {
    pub collector: Arc<Collector>,
}

impl AppState {
    pub fn new(collector: Arc<Collector>) -> web::Data<Self> {
        web::Data::new(Self { collector })
    }
}

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(showtimes)
        .service(theaters)
        .service(refresh)
        .service(health);
}

fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": message }))
}

#[get("/showtimes")]
async fn showtimes(state: web::Data<AppState>) -> impl Responder {
    match state.collector.cache().read().await {
        Ok(cached) => HttpResponse::Ok().json(cached),
        Err(e) => {
            error!(error = %e, "Failed to read cached showtimes");
            internal_error(e.to_string())
        }
    }
}

#[get("/theaters")]
async fn theaters(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "theaters": state.collector.theaters() }))
}

/// Scrapes inline; the caller waits for the whole run.
#[get("/refresh")]
async fn refresh(state: web::Data<AppState>) -> impl Responder {
    match state.collector.collect_all().await {
        Ok(snapshot) => HttpResponse::Ok().json(json!({ "status": "Refreshed", "data": snapshot })),
        Err(e) => {
            error!(error = %e, "Manual refresh failed");
            internal_error(e.to_string())
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK", "message": HEALTH_MESSAGE }))
}
