//! 借阅实体

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub library_item_id: i64,
    pub borrower_id: i64,
    pub issued_by: Option<i64>,
    pub borrowed_at: i64,
    pub due_date: String,
    pub returned_at: Option<i64>,
    pub status: String,
    #[sea_orm(column_type = "Double")]
    pub fine_amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::library_items::Entity",
        from = "Column::LibraryItemId",
        to = "super::library_items::Column::Id"
    )]
    LibraryItem,
}

impl Related<super::library_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LibraryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_loan(self) -> crate::models::library::entities::Loan {
        use crate::models::library::entities::{Loan, LoanStatus};

        Loan {
            id: self.id,
            library_item_id: self.library_item_id,
            borrower_id: self.borrower_id,
            issued_by: self.issued_by,
            borrowed_at: to_datetime(self.borrowed_at),
            due_date: to_date(&self.due_date),
            returned_at: self.returned_at.map(to_datetime),
            status: self
                .status
                .parse::<LoanStatus>()
                .unwrap_or(LoanStatus::Active),
            fine_amount: self.fine_amount,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
