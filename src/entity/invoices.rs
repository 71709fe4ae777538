//! 账单实体

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,
    #[sea_orm(column_type = "Double")]
    pub amount_paid: f64,
    pub due_date: String,
    pub status: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::invoice_items::Entity")]
    Items,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invoice(self) -> crate::models::finance::entities::Invoice {
        use crate::models::finance::entities::{Invoice, InvoiceStatus};

        Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            student_id: self.student_id,
            fee_structure_id: self.fee_structure_id,
            description: self.description,
            total_amount: self.total_amount,
            amount_paid: self.amount_paid,
            due_date: to_date(&self.due_date),
            status: self
                .status
                .parse::<InvoiceStatus>()
                .unwrap_or(InvoiceStatus::Unpaid),
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
