use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::AuditEvent;
use crate::storage::{StudentStorage, UserStorage};

/// 删除学生账号，档案与资料随用户级联删除；仍有选课、账单等记录时返回 409
pub async fn handle_delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    storage
        .get_student_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;
    storage.delete_user(id).await?;
    RequireJWT::evict_user(request, id).await;

    AuditEvent::delete("student", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Student deleted successfully",
    )))
}
