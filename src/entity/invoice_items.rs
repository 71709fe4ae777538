//! 账单明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoice_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Double")]
    pub unit_amount: f64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id",
        on_delete = "Cascade"
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
    pub fn into_invoice_item(self) -> crate::models::finance::entities::InvoiceItem {
        crate::models::finance::entities::InvoiceItem {
            id: self.id,
            invoice_id: self.invoice_id,
            description: self.description,
            quantity: self.quantity,
            unit_amount: self.unit_amount,
            amount: self.amount,
        }
    }
}
