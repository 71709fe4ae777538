use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::models::users::entities::Profile;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    LecturerStatus {
        Active => "active",
        OnLeave => "on_leave",
        Inactive => "inactive",
    }
}

/// 讲师档案，`id` 与用户 ID 相同
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: i64,
    pub staff_number: String,
    pub department_id: i64,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: LecturerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LecturerDetail {
    #[serde(flatten)]
    pub lecturer: Lecturer,
    pub email: String,
    pub profile: Option<Profile>,
}

impl Owned for Lecturer {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::LecturerId | OwnerField::UserId => Some(self.id),
            _ => None,
        }
    }
}

impl Owned for LecturerDetail {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        self.lecturer.owner(field)
    }
}
