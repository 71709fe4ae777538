pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod profile;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{
    CreateUserRequest, UpdateProfileRequest, UpdateUserRequest, UserListParams,
};

crate::services::lazy_service!(
    /// 用户账号与资料管理
    UserService
);

impl UserService {
    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    pub async fn get_profile(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::get_profile(self, user_id, request).await
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        update_data: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, user_id, update_data, request).await
    }
}
