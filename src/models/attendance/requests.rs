use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::AttendanceStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub class_section_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub student_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub date_to: Option<NaiveDate>,
}

/// 出勤汇总查询
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceSummaryQuery {
    pub student_id: i64,
    pub class_section_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// 一次点名：同一教学班、同一天的多条记录
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttendanceRequest {
    pub class_section_id: i64,
    pub date: NaiveDate,
    pub records: Vec<AttendanceEntry>,
}

impl Validate for RecordAttendanceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.check(
            !self.records.is_empty(),
            "records",
            "records must contain at least one entry",
        );
        let mut seen = std::collections::HashSet::new();
        for entry in &self.records {
            if !seen.insert(entry.student_id) {
                v.add(
                    "records",
                    format!("student {} appears more than once", entry.student_id),
                );
            }
        }
        v.finish()
    }
}
