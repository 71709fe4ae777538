//! 评估实体

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub max_score: f64,
    pub weight: f64,
    pub due_date: Option<String>,
    pub status: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_sections::Entity",
        from = "Column::ClassSectionId",
        to = "super::class_sections::Column::Id"
    )]
    ClassSection,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::class_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSection.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentKind, AssessmentStatus};

        Assessment {
            id: self.id,
            class_section_id: self.class_section_id,
            title: self.title,
            description: self.description,
            kind: self
                .kind
                .parse::<AssessmentKind>()
                .unwrap_or(AssessmentKind::Assignment),
            max_score: self.max_score,
            weight: self.weight,
            due_date: self.due_date.as_deref().map(to_date),
            status: self
                .status
                .parse::<AssessmentStatus>()
                .unwrap_or(AssessmentStatus::Draft),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
