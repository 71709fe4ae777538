use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, enrollments::entities::EnrollmentStatus};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::EnrollmentStorage;

/// 退课只修改状态，记录保留
pub async fn handle_drop(
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
    rbac::authorize(&actor, perm::ENROLLMENTS_DELETE, Some(&enrollment))?;

    if enrollment.status != EnrollmentStatus::Enrolled {
        return Err(CampusError::validation("Only active enrollments can be dropped").into());
    }

    let enrollment = storage
        .set_enrollment_status(id, EnrollmentStatus::Dropped)
        .await?
        .ok_or_else(|| CampusError::not_found("Enrollment not found"))?;
    AuditEvent::new("drop", "enrollment")
        .resource_id(id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollment,
        "Enrollment dropped successfully",
    )))
}
