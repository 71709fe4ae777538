//! 用户资料实体

use sea_orm::entity::prelude::*;

use super::to_date;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::users::entities::Profile {
        crate::models::users::entities::Profile {
            user_id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            gender: self.gender,
            date_of_birth: self.date_of_birth.as_deref().map(to_date),
            address: self.address,
            avatar_url: self.avatar_url,
        }
    }
}
