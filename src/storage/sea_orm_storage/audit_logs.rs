//! 审计日志存储操作

use super::SeaOrmStorage;
use crate::entity::audit_logs::Column;
use crate::entity::prelude::{AuditLogActiveModel, AuditLogs};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    audit_logs::{
        entities::AuditLog,
        requests::{AuditLogListParams, NewAuditLog},
    },
};
use crate::storage::AuditLogStorage;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait::async_trait]
impl AuditLogStorage for SeaOrmStorage {
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog> {
        let model = AuditLogActiveModel {
            user_id: Set(log.user_id),
            action: Set(log.action),
            resource: Set(log.resource),
            resource_id: Set(log.resource_id),
            details: Set(log.details),
            ip_address: Set(log.ip_address),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_audit_log())
    }

    async fn list_audit_logs(
        &self,
        params: AuditLogListParams,
    ) -> Result<PaginatedResponse<AuditLog>> {
        let mut select = AuditLogs::find();

        if let Some(user_id) = params.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
        if let Some(ref resource) = params.resource {
            select = select.filter(Column::Resource.eq(resource.as_str()));
        }
        if let Some(ref action) = params.action {
            select = select.filter(Column::Action.eq(action.as_str()));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_audit_log())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_filter_by_resource() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for resource in ["faculty", "faculty", "invoice"] {
            storage
                .create_audit_log(NewAuditLog {
                    user_id: None,
                    action: "create".into(),
                    resource: resource.into(),
                    resource_id: Some(1),
                    details: None,
                    ip_address: Some("127.0.0.1".into()),
                })
                .await
                .unwrap();
        }

        let page = storage
            .list_audit_logs(AuditLogListParams {
                resource: Some("faculty".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert!(page.items.iter().all(|log| log.resource == "faculty"));
    }
}
