use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResearchService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, research::requests::AddProjectMemberRequest};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::{ResearchStorage, UserStorage};
use crate::utils::validate::Validate;

// 成员变更视同修改项目，项目负责人可操作
pub async fn handle_add(
    service: &ResearchService,
    project_id: i64,
    member: AddProjectMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    member.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let project = storage
        .get_project_by_id(project_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;
    rbac::authorize(&actor, perm::RESEARCH_WRITE, Some(&project))?;

    storage
        .get_user_by_id(member.user_id)
        .await?
        .ok_or_else(|| CampusError::validation("User does not exist"))?;

    if storage
        .find_project_member(project_id, member.user_id)
        .await?
        .is_some()
    {
        return Err(CampusError::conflict("User is already a member of this project").into());
    }

    let added = storage
        .add_project_member(project_id, member.user_id, &member.member_role)
        .await?;
    AuditEvent::new("add_member", "research_project")
        .resource_id(project_id)
        .details(format!("user {}", member.user_id))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        added,
        "Project member added successfully",
    )))
}

pub async fn handle_remove(
    service: &ResearchService,
    project_id: i64,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let project = storage
        .get_project_by_id(project_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;
    rbac::authorize(&actor, perm::RESEARCH_WRITE, Some(&project))?;

    if !storage.remove_project_member(project_id, user_id).await? {
        return Err(CampusError::not_found("Project member not found").into());
    }
    AuditEvent::new("remove_member", "research_project")
        .resource_id(project_id)
        .details(format!("user {user_id}"))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Project member removed successfully",
    )))
}
