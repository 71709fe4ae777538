use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacultyListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub dean_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFacultyRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub dean_id: Option<i64>,
}

impl Validate for CreateFacultyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .code("code", &self.code)
            .length("name", &self.name, 2, 128)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFacultyRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dean_id: Option<i64>,
}

impl Validate for UpdateFacultyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(code) = &self.code {
            v.code("code", code);
        }
        v.optional_length("name", self.name.as_deref(), 2, 128)
            .finish()
    }
}
