//! 项目成员实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub member_role: String,
    pub joined_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::research_projects::Entity",
        from = "Column::ProjectId",
        to = "super::research_projects::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::research_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_project_member(self) -> crate::models::research::entities::ProjectMember {
        crate::models::research::entities::ProjectMember {
            id: self.id,
            project_id: self.project_id,
            user_id: self.user_id,
            member_role: self.member_role,
            joined_at: to_datetime(self.joined_at),
        }
    }
}
