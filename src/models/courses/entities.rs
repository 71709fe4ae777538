use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    CourseStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub program_id: i64,
    /// 课程负责讲师
    pub lecturer_id: Option<i64>,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub semester: i32,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Course {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::LecturerId => self.lecturer_id,
            _ => None,
        }
    }
}
