use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::SourcesParams;
use crate::AppState;

pub async fn list_sources(
    state: web::Data<AppState>,
    params: web::Query<SourcesParams>,
) -> Result<HttpResponse, AppError> {
    let images = state.catalog_service.list_images(&params).await?;
    Ok(HttpResponse::Ok().json(images))
}
