use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub class_section_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Attendance {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId => Some(self.student_id),
            _ => None,
        }
    }
}

/// 按状态统计的出勤汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub excused: u64,
    /// (present + late) / total，百分比，保留两位小数
    pub attendance_rate: f64,
}

impl AttendanceSummary {
    pub fn from_statuses(statuses: impl IntoIterator<Item = AttendanceStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.total += 1;
            match status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        if summary.total > 0 {
            let rate = (summary.present + summary.late) as f64 * 100.0 / summary.total as f64;
            summary.attendance_rate = (rate * 100.0).round() / 100.0;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rate() {
        let summary = AttendanceSummary::from_statuses([
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Absent,
        ]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.attendance_rate, 66.67);
        assert_eq!(AttendanceSummary::from_statuses([]).attendance_rate, 0.0);
    }
}
