use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    NotificationKind {
        Info => "info",
        Warning => "warning",
        Academic => "academic",
        Finance => "finance",
        Library => "library",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Owned for Notification {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::RecipientId => Some(self.recipient_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCount {
    pub unread: u64,
}
