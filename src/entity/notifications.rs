//! 通知实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::notifications::entities::{Notification, NotificationKind};

        Notification {
            id: self.id,
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            kind: self
                .kind
                .parse::<NotificationKind>()
                .unwrap_or(NotificationKind::Info),
            is_read: self.is_read,
            read_at: self.read_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
        }
    }
}
