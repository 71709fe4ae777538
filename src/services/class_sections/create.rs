use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, class_sections::requests::CreateClassSectionRequest};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::services::AuditEvent;
use crate::storage::{ClassSectionStorage, CourseStorage, LecturerStorage};
use crate::utils::validate::Validate;

pub async fn handle_create_class_section(
    service: &ClassSectionService,
    section: CreateClassSectionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    section.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    // 讲师可以为自己开班
    rbac::authorize(
        &actor,
        perm::CLASS_SECTIONS_WRITE,
        Some(&ResourceFields::new().with(OwnerField::LecturerId, section.lecturer_id)),
    )?;

    let storage = service.get_storage(request)?;
    if storage.get_course_by_id(section.course_id).await?.is_none() {
        return Err(CampusError::validation("Course does not exist").into());
    }
    if storage
        .get_lecturer_by_id(section.lecturer_id)
        .await?
        .is_none()
    {
        return Err(CampusError::validation("Lecturer does not exist").into());
    }

    if storage
        .find_class_section(
            section.course_id,
            &section.section_code,
            &section.academic_year,
            section.semester,
        )
        .await?
        .is_some()
    {
        return Err(CampusError::conflict(
            "Class section already exists for this course and term",
        )
        .into());
    }

    let section = storage.create_class_section(section).await?;
    AuditEvent::create("class_section", section.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        section,
        "Class section created successfully",
    )))
}
