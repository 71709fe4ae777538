use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    /// 学历层次
    ProgramLevel {
        Certificate => "certificate",
        Diploma => "diploma",
        HigherDiploma => "higher_diploma",
        Degree => "degree",
    }
}

string_enum! {
    ProgramStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub level: ProgramLevel,
    pub duration_years: i32,
    pub description: Option<String>,
    pub status: ProgramStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
