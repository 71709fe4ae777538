use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    attendance::requests::RecordAttendanceRequest,
    enrollments::entities::EnrollmentStatus,
};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::{AttendanceStorage, ClassSectionStorage, EnrollmentStorage};
use crate::utils::validate::{Validate, Validator};

/// 同一班级、学生、日期重复登记时覆盖原记录
pub async fn handle_record_attendance(
    service: &AttendanceService,
    attendance: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    attendance.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let section = storage
        .get_class_section_by_id(attendance.class_section_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    rbac::authorize(&actor, perm::ATTENDANCE_WRITE, Some(&section))?;

    // 只能为在读学生登记
    let mut v = Validator::new();
    for entry in &attendance.records {
        let enrolled = storage
            .find_enrollment(entry.student_id, section.id)
            .await?
            .is_some_and(|e| e.status == EnrollmentStatus::Enrolled);
        v.check(
            enrolled,
            "records",
            &format!(
                "student {} is not enrolled in this class section",
                entry.student_id
            ),
        );
    }
    v.finish()?;

    let mut recorded = Vec::with_capacity(attendance.records.len());
    for entry in attendance.records {
        recorded.push(
            storage
                .upsert_attendance(section.id, attendance.date, entry, actor.id)
                .await?,
        );
    }

    AuditEvent::new("record", "attendance")
        .resource_id(section.id)
        .details(format!("{} records on {}", recorded.len(), attendance.date))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        recorded,
        "Attendance recorded successfully",
    )))
}
