//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::Column;
use crate::entity::prelude::{NotificationActiveModel, Notifications};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListParams},
    },
};
use crate::storage::NotificationStorage;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl NotificationStorage for SeaOrmStorage {
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        let model = NotificationActiveModel {
            recipient_id: Set(req.recipient_id),
            title: Set(req.title),
            message: Set(req.message),
            kind: Set(req.kind.to_string()),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_notification())
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_notification()))
    }

    async fn list_notifications(
        &self,
        params: NotificationListParams,
    ) -> Result<PaginatedResponse<Notification>> {
        let mut select = Notifications::find();

        if let Some(recipient_id) = params.recipient_id {
            select = select.filter(Column::RecipientId.eq(recipient_id));
        }
        if let Some(is_read) = params.is_read {
            select = select.filter(Column::IsRead.eq(is_read));
        }
        if let Some(kind) = params.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_notification())
            .await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>> {
        let Some(existing) = Notifications::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        // 已读的保留首次阅读时间
        if existing.is_read {
            return Ok(Some(existing.into_notification()));
        }

        let model = NotificationActiveModel {
            id: Set(id),
            is_read: Set(true),
            read_at: Set(Some(chrono::Utc::now().timestamp())),
            ..Default::default()
        };

        Ok(Some(model.update(&self.db).await?.into_notification()))
    }

    async fn mark_all_notifications_read(&self, recipient_id: i64) -> Result<u64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .col_expr(Column::ReadAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<u64> {
        Ok(Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await?)
    }
}
