//! 科研项目实体

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "research_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub principal_investigator_id: i64,
    pub status: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub budget: Option<f64>,
    pub funding_source: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_members::Entity")]
    Members,
}

impl Related<super::project_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_research_project(self) -> crate::models::research::entities::ResearchProject {
        use crate::models::research::entities::{ProjectStatus, ResearchProject};

        ResearchProject {
            id: self.id,
            title: self.title,
            description: self.description,
            principal_investigator_id: self.principal_investigator_id,
            status: self
                .status
                .parse::<ProjectStatus>()
                .unwrap_or(ProjectStatus::Proposed),
            start_date: self.start_date.as_deref().map(to_date),
            end_date: self.end_date.as_deref().map(to_date),
            budget: self.budget,
            funding_source: self.funding_source,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
