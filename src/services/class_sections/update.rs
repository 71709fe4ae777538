use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, class_sections::requests::UpdateClassSectionRequest};
use crate::rbac::{self, AccessScope, perm};
use crate::services::AuditEvent;
use crate::storage::{ClassSectionStorage, EnrollmentStorage, LecturerStorage};
use crate::utils::validate::Validate;

pub async fn handle_update_class_section(
    service: &ClassSectionService,
    id: i64,
    update: UpdateClassSectionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let section = storage
        .get_class_section_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    rbac::authorize(&actor, perm::CLASS_SECTIONS_WRITE, Some(&section))?;
    if rbac::list_scope(&actor, perm::CLASS_SECTIONS_WRITE) == Some(AccessScope::Own)
        && !update.touches_only_logistics()
    {
        return Err(CampusError::authorization(
            "Lecturers may only update room and schedule",
        )
        .into());
    }

    if let Some(lecturer_id) = update.lecturer_id
        && storage.get_lecturer_by_id(lecturer_id).await?.is_none()
    {
        return Err(CampusError::validation("Lecturer does not exist").into());
    }

    // 容量不能低于当前在读人数
    if let Some(capacity) = update.capacity {
        let enrolled = storage.count_active_enrollments(id).await?;
        if (capacity as u64) < enrolled {
            return Err(CampusError::validation(format!(
                "Capacity cannot be lower than the {enrolled} students already enrolled"
            ))
            .into());
        }
    }

    let section = storage
        .update_class_section(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    AuditEvent::update("class_section", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        section,
        "Class section updated successfully",
    )))
}
