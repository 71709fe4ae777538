use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    SectionStatus {
        Open => "open",
        Closed => "closed",
        Cancelled => "cancelled",
    }
}

/// 某门课程在某学年某学期开设的教学班
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub section_code: String,
    pub academic_year: String,
    pub semester: i32,
    pub capacity: i32,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub status: SectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for ClassSection {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::LecturerId => Some(self.lecturer_id),
            _ => None,
        }
    }
}
