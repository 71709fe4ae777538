use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, enrollments::requests::EnrollmentListParams};
use crate::rbac::{self, perm};
use crate::services::scoped_owner;
use crate::storage::EnrollmentStorage;

pub async fn handle_list_enrollments(
    service: &EnrollmentService,
    mut query: EnrollmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.student_id = scoped_owner(&actor, perm::ENROLLMENTS_READ, query.student_id)?;

    let storage = service.get_storage(request)?;
    let enrollments = storage.list_enrollments(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollments,
        "Enrollments retrieved successfully",
    )))
}

pub async fn handle_get_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let enrollment = storage
        .get_enrollment_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Enrollment not found"))?;
    rbac::authorize(&actor, perm::ENROLLMENTS_READ, Some(&enrollment))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollment,
        "Enrollment retrieved successfully",
    )))
}
