use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::models::{ApiResponse, class_sections::requests::ClassSectionListParams};
use crate::storage::ClassSectionStorage;

pub async fn handle_list_class_sections(
    service: &ClassSectionService,
    query: ClassSectionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let sections = storage.list_class_sections(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        sections,
        "Class sections retrieved successfully",
    )))
}
