use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    class_sections::entities::SectionStatus,
    enrollments::{entities::EnrollmentStatus, requests::EnrollRequest},
};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::services::AuditEvent;
use crate::storage::{ClassSectionStorage, EnrollmentStorage, StudentStorage};

/// 选课
///
/// 学生不传 `student_id` 时为自己选课。班级必须开放且未满；
/// 已退课的记录会被重新激活，不会新建第二条。
pub async fn handle_enroll(
    service: &EnrollmentService,
    enroll_request: EnrollRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let student_id = enroll_request.student_id.unwrap_or(actor.id);
    rbac::authorize(
        &actor,
        perm::ENROLLMENTS_WRITE,
        Some(&ResourceFields::new().with(OwnerField::StudentId, student_id)),
    )?;

    let storage = service.get_storage(request)?;
    if storage.get_student_by_id(student_id).await?.is_none() {
        return Err(CampusError::validation("Student does not exist").into());
    }

    let section = storage
        .get_class_section_by_id(enroll_request.class_section_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    if section.status != SectionStatus::Open {
        return Err(CampusError::validation("Class section is not open for enrollment").into());
    }

    let existing = storage.find_enrollment(student_id, section.id).await?;
    if let Some(enrollment) = &existing
        && enrollment.status != EnrollmentStatus::Dropped
    {
        return Err(CampusError::conflict("Student is already enrolled in this class section").into());
    }

    let enrolled = storage.count_active_enrollments(section.id).await?;
    if enrolled >= section.capacity as u64 {
        return Err(CampusError::conflict("Class section is full").into());
    }

    let enrollment = match existing {
        Some(dropped) => storage
            .set_enrollment_status(dropped.id, EnrollmentStatus::Enrolled)
            .await?
            .ok_or_else(|| CampusError::not_found("Enrollment not found"))?,
        None => storage.create_enrollment(student_id, section.id).await?,
    };

    info!(
        "Student {} enrolled in class section {}",
        student_id, section.id
    );
    AuditEvent::create("enrollment", enrollment.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        enrollment,
        "Enrolled successfully",
    )))
}
