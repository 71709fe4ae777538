//! 讲师档案实体，主键与用户 ID 相同

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lecturers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(unique)]
    pub staff_number: String,
    pub department_id: i64,
    pub specialization: Option<String>,
    pub hire_date: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Id",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lecturer(self) -> crate::models::lecturers::entities::Lecturer {
        use crate::models::lecturers::entities::{Lecturer, LecturerStatus};

        Lecturer {
            id: self.id,
            staff_number: self.staff_number,
            department_id: self.department_id,
            specialization: self.specialization,
            hire_date: self.hire_date.as_deref().map(to_date),
            status: self
                .status
                .parse::<LecturerStatus>()
                .unwrap_or(LecturerStatus::Active),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
