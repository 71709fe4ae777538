use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .email("email", &self.email)
            .password("password", &self.password)
            .length("first_name", &self.first_name, 1, 64)
            .length("last_name", &self.last_name, 1, 64)
            .phone("phone", self.phone.as_deref())
            .finish()
    }
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(email) = &self.email {
            v.email("email", email);
        }
        v.finish()
    }
}

// 资料更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_length("first_name", self.first_name.as_deref(), 1, 64)
            .optional_length("last_name", self.last_name.as_deref(), 1, 64)
            .phone("phone", self.phone.as_deref())
            .optional_length("address", self.address.as_deref(), 1, 255)
            .finish()
    }
}

/// 存储层使用的新用户数据（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}
