pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::class_sections::requests::{
    ClassSectionListParams, CreateClassSectionRequest, UpdateClassSectionRequest,
};

crate::services::lazy_service!(
    /// 教学班管理
    ClassSectionService
);

impl ClassSectionService {
    pub async fn list_class_sections(
        &self,
        query: ClassSectionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_class_sections(self, query, request).await
    }

    pub async fn get_class_section(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_class_section(self, id, request).await
    }

    pub async fn create_class_section(
        &self,
        section: CreateClassSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_class_section(self, section, request).await
    }

    // 讲师只能修改自己班级的教室与时间安排
    pub async fn update_class_section(
        &self,
        id: i64,
        update: UpdateClassSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_class_section(self, id, update, request).await
    }

    pub async fn delete_class_section(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_class_section(self, id, request).await
    }
}
