use serde::Deserialize;

use super::entities::CourseStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub program_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub lecturer_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub semester: Option<i32>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub program_id: i64,
    pub lecturer_id: Option<i64>,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub semester: i32,
}

impl Validate for CreateCourseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .code("code", &self.code)
            .length("title", &self.title, 2, 160)
            .range("credits", self.credits, 1, 30)
            .range("semester", self.semester, 1, 12)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub program_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<i32>,
    pub status: Option<CourseStatus>,
}

impl UpdateCourseRequest {
    /// 是否只修改了讲师可编辑的内容字段
    pub fn touches_only_content(&self) -> bool {
        self.program_id.is_none()
            && self.lecturer_id.is_none()
            && self.code.is_none()
            && self.status.is_none()
    }
}

impl Validate for UpdateCourseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(code) = &self.code {
            v.code("code", code);
        }
        if let Some(credits) = self.credits {
            v.range("credits", credits, 1, 30);
        }
        if let Some(semester) = self.semester {
            v.range("semester", semester, 1, 12);
        }
        v.optional_length("title", self.title.as_deref(), 2, 160)
            .finish()
    }
}
