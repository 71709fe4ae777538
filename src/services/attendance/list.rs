use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, attendance::requests::AttendanceListParams};
use crate::rbac::perm;
use crate::services::scoped_owner;
use crate::storage::AttendanceStorage;

pub async fn handle_list_attendance(
    service: &AttendanceService,
    mut query: AttendanceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.student_id = scoped_owner(&actor, perm::ATTENDANCE_READ, query.student_id)?;

    let storage = service.get_storage(request)?;
    let records = storage.list_attendance(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        records,
        "Attendance retrieved successfully",
    )))
}
