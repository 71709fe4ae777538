//! 专业实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub level: String,
    pub duration_years: i32,
    pub description: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_program(self) -> crate::models::programs::entities::Program {
        use crate::models::programs::entities::{Program, ProgramLevel, ProgramStatus};

        Program {
            id: self.id,
            department_id: self.department_id,
            code: self.code,
            name: self.name,
            level: self
                .level
                .parse::<ProgramLevel>()
                .unwrap_or(ProgramLevel::Certificate),
            duration_years: self.duration_years,
            description: self.description,
            status: self
                .status
                .parse::<ProgramStatus>()
                .unwrap_or(ProgramStatus::Active),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
