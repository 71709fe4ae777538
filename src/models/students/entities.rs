use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::models::users::entities::Profile;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    StudentStatus {
        Active => "active",
        Suspended => "suspended",
        Graduated => "graduated",
        Withdrawn => "withdrawn",
    }
}

/// 学生档案，`id` 与用户 ID 相同
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub student_number: String,
    pub program_id: i64,
    pub admission_date: NaiveDate,
    pub year_of_study: i32,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    pub email: String,
    pub profile: Option<Profile>,
}

impl Owned for Student {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId | OwnerField::UserId => Some(self.id),
            _ => None,
        }
    }
}

impl Owned for StudentDetail {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        self.student.owner(field)
    }
}
