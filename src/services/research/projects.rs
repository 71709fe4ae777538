use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResearchService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    research::requests::{
        CreateResearchProjectRequest, ResearchProjectListParams, UpdateResearchProjectRequest,
    },
};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::services::AuditEvent;
use crate::storage::{ResearchStorage, UserStorage};
use crate::utils::validate::Validate;

pub async fn handle_list(
    service: &ResearchService,
    query: ResearchProjectListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let projects = storage.list_projects(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        projects,
        "Research projects retrieved successfully",
    )))
}

pub async fn handle_get(
    service: &ResearchService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let project = storage
        .get_project_detail(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        project,
        "Research project retrieved successfully",
    )))
}

/// 创建项目
///
/// 负责人缺省为当前用户；为他人立项需要完整的 `research:write`。
pub async fn handle_create(
    service: &ResearchService,
    project: CreateResearchProjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    project.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let pi_id = project.principal_investigator_id.unwrap_or(actor.id);
    if pi_id != actor.id {
        rbac::authorize(
            &actor,
            perm::RESEARCH_WRITE,
            Some(&ResourceFields::new().with(OwnerField::PrincipalInvestigatorId, pi_id)),
        )?;
        storage
            .get_user_by_id(pi_id)
            .await?
            .ok_or_else(|| CampusError::validation("Principal investigator does not exist"))?;
    }

    let project = storage.create_project(project, pi_id).await?;
    AuditEvent::create("research_project", project.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        project,
        "Research project created successfully",
    )))
}

pub async fn handle_update(
    service: &ResearchService,
    id: i64,
    update: UpdateResearchProjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let project = storage
        .get_project_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;
    rbac::authorize(&actor, perm::RESEARCH_WRITE, Some(&project))?;

    let project = storage
        .update_project(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;
    AuditEvent::update("research_project", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        project,
        "Research project updated successfully",
    )))
}

pub async fn handle_delete(
    service: &ResearchService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let project = storage
        .get_project_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Research project not found"))?;
    rbac::authorize(&actor, perm::RESEARCH_DELETE, Some(&project))?;

    storage.delete_project(id).await?;
    AuditEvent::delete("research_project", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Research project deleted successfully",
    )))
}
