use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub user_id: Option<i64>,
    pub resource: Option<String>,
    pub action: Option<String>,
}

/// 一条待写入的审计记录
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub user_id: Option<i64>,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
}
