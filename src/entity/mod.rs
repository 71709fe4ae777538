//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳以秒存储，日期以 `YYYY-MM-DD` 字符串存储。

pub mod prelude;

pub mod assessments;
pub mod attendance;
pub mod audit_logs;
pub mod class_sections;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod faculties;
pub mod fee_structures;
pub mod grades;
pub mod invoice_items;
pub mod invoices;
pub mod lecturers;
pub mod library_items;
pub mod loans;
pub mod notifications;
pub mod payments;
pub mod profiles;
pub mod programs;
pub mod project_members;
pub mod research_projects;
pub mod students;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_columns_sort_lexically() {
        let earlier = format_date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        let later = format_date(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(earlier, "2025-09-01");
        assert!(earlier < later);
        assert_eq!(to_date(&later), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }

    #[test]
    fn test_bad_values_fall_back() {
        assert_eq!(to_date("not-a-date"), NaiveDate::default());
        assert_eq!(to_datetime(0).timestamp(), 0);
    }
}
