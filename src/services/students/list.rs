use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, students::requests::StudentListParams};
use crate::rbac::{self, perm};
use crate::storage::StudentStorage;

pub async fn handle_list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 学生只能查看自己的档案，不能浏览列表
    rbac::authorize(&RequireJWT::extract_actor(request)?, perm::STUDENTS_READ, None)?;

    let storage = service.get_storage(request)?;
    let students = storage.list_students(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        students,
        "Students retrieved successfully",
    )))
}
