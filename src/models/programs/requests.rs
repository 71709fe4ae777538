use serde::Deserialize;

use super::entities::{ProgramLevel, ProgramStatus};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub department_id: Option<i64>,
    pub level: Option<ProgramLevel>,
    pub status: Option<ProgramStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgramRequest {
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub level: ProgramLevel,
    pub duration_years: i32,
    pub description: Option<String>,
}

impl Validate for CreateProgramRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .code("code", &self.code)
            .length("name", &self.name, 2, 128)
            .range("duration_years", self.duration_years, 1, 8)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgramRequest {
    pub department_id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub level: Option<ProgramLevel>,
    pub duration_years: Option<i32>,
    pub description: Option<String>,
    pub status: Option<ProgramStatus>,
}

impl Validate for UpdateProgramRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(code) = &self.code {
            v.code("code", code);
        }
        if let Some(years) = self.duration_years {
            v.range("duration_years", years, 1, 8);
        }
        v.optional_length("name", self.name.as_deref(), 2, 128)
            .finish()
    }
}
