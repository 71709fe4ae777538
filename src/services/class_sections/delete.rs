use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{AssessmentStorage, ClassSectionStorage, EnrollmentStorage};

// 有选课或评估记录的班级不能删除
pub async fn handle_delete_class_section(
    service: &ClassSectionService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    storage
        .get_class_section_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    ensure_unreferenced(
        storage.count_enrollments_for_section(id).await?,
        "Cannot delete class section with enrollments",
    )?;
    ensure_unreferenced(
        storage.count_assessments_for_section(id).await?,
        "Cannot delete class section with assessments",
    )?;

    storage.delete_class_section(id).await?;
    AuditEvent::delete("class_section", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Class section deleted successfully",
    )))
}
