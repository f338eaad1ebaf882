use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::HistoryParams;
use crate::AppState;

pub async fn list_history(
    state: web::Data<AppState>,
    params: web::Query<HistoryParams>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = params.validate() {
        return Err(AppError::Validation(format!("Validation error: {}", e)));
    }

    let entries = state.history.list(params.offset(), params.limit).await?;
    Ok(HttpResponse::Ok().json(entries))
}

pub async fn delete_history(
    state: web::Data<AppState>,
    search_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let search_id = Uuid::parse_str(&search_id)
        .map_err(|e| AppError::Validation(format!("Invalid search id: {}", e)))?;
    if state.history.delete(search_id).await? {
        tracing::info!(%search_id, "Deleted search history entry");
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound("Search entry not found.".to_string()))
    }
}
