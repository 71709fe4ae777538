use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::errors::CampusError;
use crate::models::{ApiResponse, assessments::requests::AssessmentListParams};
use crate::storage::AssessmentStorage;

pub async fn handle_list_assessments(
    service: &AssessmentService,
    query: AssessmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let assessments = storage.list_assessments(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assessments,
        "Assessments retrieved successfully",
    )))
}

pub async fn handle_get_assessment(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let assessment = storage
        .get_assessment_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Assessment not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assessment,
        "Assessment retrieved successfully",
    )))
}
