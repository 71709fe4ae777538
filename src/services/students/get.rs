use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::rbac::{self, perm};
use crate::storage::StudentStorage;

pub async fn handle_get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let student = storage
        .get_student_detail(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;
    rbac::authorize(&actor, perm::STUDENTS_READ, Some(&student))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student retrieved successfully",
    )))
}
