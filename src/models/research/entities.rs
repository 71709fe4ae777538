use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    ProjectStatus {
        Proposed => "proposed",
        Active => "active",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProject {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub principal_investigator_id: i64,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub funding_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for ResearchProject {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::PrincipalInvestigatorId => Some(self.principal_investigator_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub member_role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProjectDetail {
    #[serde(flatten)]
    pub project: ResearchProject,
    pub members: Vec<ProjectMember>,
}

impl Owned for ResearchProjectDetail {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        self.project.owner(field)
    }
}
