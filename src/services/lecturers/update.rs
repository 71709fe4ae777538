use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, lecturers::requests::UpdateLecturerRequest};
use crate::rbac::{self, AccessScope, perm};
use crate::services::AuditEvent;
use crate::storage::{DepartmentStorage, LecturerStorage};
use crate::utils::validate::Validate;

/// 讲师本人只能修改研究方向，调系与状态变更需要完整权限
pub async fn handle_update_lecturer(
    service: &LecturerService,
    id: i64,
    update: UpdateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let lecturer = storage
        .get_lecturer_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Lecturer not found"))?;
    rbac::authorize(&actor, perm::LECTURERS_WRITE, Some(&lecturer))?;
    if rbac::list_scope(&actor, perm::LECTURERS_WRITE) == Some(AccessScope::Own)
        && (update.department_id.is_some() || update.status.is_some())
    {
        return Err(CampusError::authorization(
            "Lecturers may only update their specialization",
        )
        .into());
    }

    if let Some(department_id) = update.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(CampusError::validation("Department does not exist").into());
    }

    let lecturer = storage
        .update_lecturer(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Lecturer not found"))?;
    AuditEvent::update("lecturer", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        lecturer,
        "Lecturer updated successfully",
    )))
}
