use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::research::requests::{
    AddProjectMemberRequest, CreateResearchProjectRequest, ResearchProjectListParams,
    UpdateResearchProjectRequest,
};
use crate::rbac::perm;
use crate::services::ResearchService;
use crate::utils::{SafeIDI64, SafeUserIdI64};

static RESEARCH_SERVICE: Lazy<ResearchService> = Lazy::new(ResearchService::new_lazy);

pub async fn list_projects(
    req: HttpRequest,
    query: web::Query<ResearchProjectListParams>,
) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE.list_projects(query.into_inner(), &req).await
}

pub async fn get_project(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE.get_project(id.0, &req).await
}

pub async fn create_project(
    req: HttpRequest,
    data: web::Json<CreateResearchProjectRequest>,
) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE.create_project(data.into_inner(), &req).await
}

pub async fn update_project(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateResearchProjectRequest>,
) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE
        .update_project(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_project(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE.delete_project(id.0, &req).await
}

pub async fn add_member(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<AddProjectMemberRequest>,
) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE
        .add_member(id.0, data.into_inner(), &req)
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    id: SafeIDI64,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    RESEARCH_SERVICE.remove_member(id.0, user_id.0, &req).await
}

pub fn configure_research_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/research/projects")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_projects).wrap(Allow::new(perm::RESEARCH_READ)))
                    .route(
                        web::post()
                            .to(create_project)
                            .wrap(Allow::new(perm::RESEARCH_CREATE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_project).wrap(Allow::new(perm::RESEARCH_READ)))
                    .route(web::put().to(update_project).wrap(Allow::new(perm::RESEARCH_WRITE)))
                    .route(
                        web::delete()
                            .to(delete_project)
                            .wrap(Allow::new(perm::RESEARCH_DELETE)),
                    ),
            )
            .route(
                "/{id}/members",
                web::post().to(add_member).wrap(Allow::new(perm::RESEARCH_WRITE)),
            )
            .route(
                "/{id}/members/{user_id}",
                web::delete()
                    .to(remove_member)
                    .wrap(Allow::new(perm::RESEARCH_WRITE)),
            ),
    );
}
