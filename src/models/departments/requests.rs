use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub faculty_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    pub faculty_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub head_id: Option<i64>,
}

impl Validate for CreateDepartmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .code("code", &self.code)
            .length("name", &self.name, 2, 128)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub faculty_id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub head_id: Option<i64>,
}

impl Validate for UpdateDepartmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(code) = &self.code {
            v.code("code", code);
        }
        v.optional_length("name", self.name.as_deref(), 2, 128)
            .finish()
    }
}
