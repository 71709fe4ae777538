pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::lecturers::requests::{
    CreateLecturerRequest, LecturerListParams, UpdateLecturerRequest,
};

crate::services::lazy_service!(
    /// 讲师档案管理
    LecturerService
);

impl LecturerService {
    pub async fn list_lecturers(
        &self,
        query: LecturerListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_lecturers(self, query, request).await
    }

    pub async fn create_lecturer(
        &self,
        lecturer: CreateLecturerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_lecturer(self, lecturer, request).await
    }

    pub async fn get_lecturer(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::handle_get_lecturer(self, id, request).await
    }

    pub async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_lecturer(self, id, update, request).await
    }
}
