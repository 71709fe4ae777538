//! 付款实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub invoice_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub method: String,
    #[sea_orm(unique)]
    pub reference: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub status: String,
    pub recorded_by: Option<i64>,
    pub paid_at: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoice,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::finance::entities::Payment {
        use crate::models::finance::entities::{Payment, PaymentMethod, PaymentStatus};

        Payment {
            id: self.id,
            invoice_id: self.invoice_id,
            student_id: self.student_id,
            amount: self.amount,
            method: self
                .method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            reference: self.reference,
            receipt_number: self.receipt_number,
            status: self
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Completed),
            recorded_by: self.recorded_by,
            paid_at: to_datetime(self.paid_at),
            created_at: to_datetime(self.created_at),
        }
    }
}
