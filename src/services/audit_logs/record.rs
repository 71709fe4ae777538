//! 审计记录
//!
//! 写入失败只记日志，不影响原请求的结果。

use actix_web::HttpRequest;
use tracing::warn;

use crate::models::audit_logs::requests::NewAuditLog;
use crate::storage::{AuditLogStorage, Storage};

/// 一次变更操作的审计事件
#[derive(Debug, Clone)]
pub struct AuditEvent {
    action: &'static str,
    resource: &'static str,
    resource_id: Option<i64>,
    details: Option<String>,
}

impl AuditEvent {
    pub fn new(action: &'static str, resource: &'static str) -> Self {
        Self {
            action,
            resource,
            resource_id: None,
            details: None,
        }
    }

    pub fn create(resource: &'static str, id: i64) -> Self {
        Self::new("create", resource).resource_id(id)
    }

    pub fn update(resource: &'static str, id: i64) -> Self {
        Self::new("update", resource).resource_id(id)
    }

    pub fn delete(resource: &'static str, id: i64) -> Self {
        Self::new("delete", resource).resource_id(id)
    }

    pub fn resource_id(mut self, id: i64) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub async fn record(self, storage: &dyn Storage, request: &HttpRequest, user_id: Option<i64>) {
        let log = NewAuditLog {
            user_id,
            action: self.action.to_string(),
            resource: self.resource.to_string(),
            resource_id: self.resource_id,
            details: self.details,
            ip_address: crate::services::client_ip(request),
        };

        if let Err(e) = storage.create_audit_log(log).await {
            warn!(
                "Failed to record audit log {} {}: {}",
                self.action, self.resource, e
            );
        }
    }
}
