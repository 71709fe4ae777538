//! 馆藏实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "library_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub publication_year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::loans::Entity")]
    Loans,
}

impl Related<super::loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_library_item(self) -> crate::models::library::entities::LibraryItem {
        crate::models::library::entities::LibraryItem {
            id: self.id,
            isbn: self.isbn,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            category: self.category,
            publication_year: self.publication_year,
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
