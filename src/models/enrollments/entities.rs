use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    EnrollmentStatus {
        Enrolled => "enrolled",
        Dropped => "dropped",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_section_id: i64,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Enrollment {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId => Some(self.student_id),
            _ => None,
        }
    }
}
