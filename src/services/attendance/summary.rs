use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    attendance::{entities::AttendanceSummary, requests::AttendanceSummaryQuery},
};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::storage::AttendanceStorage;

/// 学生的出勤汇总，可限定到某个班级
pub async fn handle_attendance_summary(
    service: &AttendanceService,
    query: AttendanceSummaryQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(
        &actor,
        perm::ATTENDANCE_READ,
        Some(&ResourceFields::new().with(OwnerField::StudentId, query.student_id)),
    )?;

    let storage = service.get_storage(request)?;
    let statuses = storage
        .attendance_statuses(query.student_id, query.class_section_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceSummary::from_statuses(statuses),
        "Attendance summary retrieved successfully",
    )))
}
