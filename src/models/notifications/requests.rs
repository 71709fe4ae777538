use serde::Deserialize;

use super::entities::NotificationKind;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub is_read: Option<bool>,
    pub kind: Option<NotificationKind>,
    /// 仅持有完整读取权限时生效
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub recipient_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    pub recipient_id: i64,
    pub title: String,
    pub message: String,
    #[serde(default = "default_kind")]
    pub kind: NotificationKind,
}

fn default_kind() -> NotificationKind {
    NotificationKind::Info
}

impl Validate for CreateNotificationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .length("title", &self.title, 1, 160)
            .length("message", &self.message, 1, 2000)
            .finish()
    }
}
