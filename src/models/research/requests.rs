use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::ProjectStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchProjectListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub principal_investigator_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearchProjectRequest {
    pub title: String,
    pub description: Option<String>,
    /// 缺省为当前用户
    pub principal_investigator_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub funding_source: Option<String>,
}

impl Validate for CreateResearchProjectRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.length("title", &self.title, 3, 255)
            .date_order("end_date", self.start_date, self.end_date);
        if let Some(budget) = self.budget {
            v.check(budget >= 0.0, "budget", "budget must not be negative");
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResearchProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub funding_source: Option<String>,
}

impl Validate for UpdateResearchProjectRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.optional_length("title", self.title.as_deref(), 3, 255)
            .date_order("end_date", self.start_date, self.end_date);
        if let Some(budget) = self.budget {
            v.check(budget >= 0.0, "budget", "budget must not be negative");
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddProjectMemberRequest {
    pub user_id: i64,
    #[serde(default = "default_member_role")]
    pub member_role: String,
}

fn default_member_role() -> String {
    "researcher".to_string()
}

impl Validate for AddProjectMemberRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .length("member_role", &self.member_role, 2, 64)
            .finish()
    }
}
