use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::LecturerStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LecturerListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub department_id: Option<i64>,
    pub status: Option<LecturerStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLecturerRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub department_id: i64,
    /// 缺省时按 `LEC/<NNNN>` 生成
    pub staff_number: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

impl Validate for CreateLecturerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .email("email", &self.email)
            .password("password", &self.password)
            .length("first_name", &self.first_name, 1, 64)
            .length("last_name", &self.last_name, 1, 64)
            .phone("phone", self.phone.as_deref())
            .optional_length("staff_number", self.staff_number.as_deref(), 3, 32)
            .optional_length("specialization", self.specialization.as_deref(), 2, 128)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLecturerRequest {
    pub department_id: Option<i64>,
    pub specialization: Option<String>,
    pub status: Option<LecturerStatus>,
}

impl Validate for UpdateLecturerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_length("specialization", self.specialization.as_deref(), 2, 128)
            .finish()
    }
}

/// 存储层新建讲师档案
#[derive(Debug, Clone)]
pub struct NewLecturer {
    pub user_id: i64,
    pub staff_number: String,
    pub department_id: i64,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
}
