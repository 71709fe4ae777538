use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, grades::requests::GradeListParams};
use crate::rbac::{self, perm};
use crate::services::scoped_owner;
use crate::storage::GradeStorage;

// 学生只能看到自己的成绩
pub async fn handle_list_grades(
    service: &GradeService,
    mut query: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.student_id = scoped_owner(&actor, perm::GRADES_READ, query.student_id)?;

    let storage = service.get_storage(request)?;
    let grades = storage.list_grades(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        grades,
        "Grades retrieved successfully",
    )))
}

pub async fn handle_get_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let grade = storage
        .get_grade_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Grade not found"))?;
    rbac::authorize(&actor, perm::GRADES_READ, Some(&grade))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved successfully")))
}
