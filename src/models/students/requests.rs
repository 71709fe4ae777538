use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::StudentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub program_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub year_of_study: Option<i32>,
    pub status: Option<StudentStatus>,
    /// 按学号模糊匹配
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub program_id: i64,
    /// 缺省为今天
    pub admission_date: Option<NaiveDate>,
    pub year_of_study: Option<i32>,
}

impl Validate for CreateStudentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.email("email", &self.email)
            .password("password", &self.password)
            .length("first_name", &self.first_name, 1, 64)
            .length("last_name", &self.last_name, 1, 64)
            .phone("phone", self.phone.as_deref());
        if let Some(year) = self.year_of_study {
            v.range("year_of_study", year, 1, 8);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub program_id: Option<i64>,
    pub year_of_study: Option<i32>,
    pub status: Option<StudentStatus>,
}

impl Validate for UpdateStudentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(year) = self.year_of_study {
            v.range("year_of_study", year, 1, 8);
        }
        v.finish()
    }
}

/// 存储层新建学生档案
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub user_id: i64,
    pub student_number: String,
    pub program_id: i64,
    pub admission_date: NaiveDate,
    pub year_of_study: i32,
}
