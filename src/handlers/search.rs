use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::models::SearchQuery;
use crate::AppState;

pub async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = req.validate() {
        return Err(AppError::Validation(format!("Validation error: {}", e)));
    }
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("Query cannot be empty.".to_string()));
    }

    let results = state.search_service.search(&req.query).await;
    Ok(HttpResponse::Ok().json(results))
}
