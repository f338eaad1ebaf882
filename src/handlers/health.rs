use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::models::{ErrorResponse, StatusResponse};
use crate::AppState;

pub async fn ping() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(StatusResponse {
        status: "ok".to_string(),
    }))
}

pub async fn root(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Welcome to the Space Explorer API!",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    })))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ErrorResponse::new("Endpoint not found")))
}
