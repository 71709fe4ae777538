use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::errors::CampusError;
use crate::models::ApiResponse;
use crate::storage::ClassSectionStorage;

pub async fn handle_get_class_section(
    service: &ClassSectionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let section = storage
        .get_class_section_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        section,
        "Class section retrieved successfully",
    )))
}
