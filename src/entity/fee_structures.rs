//! 收费标准实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub program_id: i64,
    pub academic_year: String,
    pub semester: i32,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::programs::Entity",
        from = "Column::ProgramId",
        to = "super::programs::Column::Id"
    )]
    Program,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_structure(self) -> crate::models::finance::entities::FeeStructure {
        crate::models::finance::entities::FeeStructure {
            id: self.id,
            program_id: self.program_id,
            academic_year: self.academic_year,
            semester: self.semester,
            amount: self.amount,
            description: self.description,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
