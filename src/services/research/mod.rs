pub mod members;
pub mod projects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::research::requests::{
    AddProjectMemberRequest, CreateResearchProjectRequest, ResearchProjectListParams,
    UpdateResearchProjectRequest,
};

crate::services::lazy_service!(
    /// 科研项目与成员
    ResearchService
);

impl ResearchService {
    pub async fn list_projects(
        &self,
        query: ResearchProjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        projects::handle_list(self, query, request).await
    }

    pub async fn get_project(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        projects::handle_get(self, id, request).await
    }

    pub async fn create_project(
        &self,
        project: CreateResearchProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        projects::handle_create(self, project, request).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        update: UpdateResearchProjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        projects::handle_update(self, id, update, request).await
    }

    pub async fn delete_project(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        projects::handle_delete(self, id, request).await
    }

    pub async fn add_member(
        &self,
        project_id: i64,
        member: AddProjectMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::handle_add(self, project_id, member, request).await
    }

    pub async fn remove_member(
        &self,
        project_id: i64,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::handle_remove(self, project_id, user_id, request).await
    }
}
