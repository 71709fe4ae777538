use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::entities::SectionStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}/\d{4}$").expect("Invalid academic year regex"));

/// 学年格式 `2025/2026`，且后一年等于前一年加一
pub fn is_valid_academic_year(value: &str) -> bool {
    if !ACADEMIC_YEAR_RE.is_match(value) {
        return false;
    }
    match value.split_once('/') {
        Some((start, end)) => match (start.parse::<i32>(), end.parse::<i32>()) {
            (Ok(start), Ok(end)) => end == start + 1,
            _ => false,
        },
        None => false,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassSectionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub lecturer_id: Option<i64>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub semester: Option<i32>,
    pub status: Option<SectionStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassSectionRequest {
    pub course_id: i64,
    pub lecturer_id: i64,
    pub section_code: String,
    pub academic_year: String,
    pub semester: i32,
    pub capacity: i32,
    pub room: Option<String>,
    pub schedule: Option<String>,
}

impl Validate for CreateClassSectionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.code("section_code", &self.section_code)
            .range("semester", self.semester, 1, 3)
            .range("capacity", self.capacity, 1, 1000)
            .optional_length("room", self.room.as_deref(), 1, 64);
        v.check(
            is_valid_academic_year(&self.academic_year),
            "academic_year",
            "academic_year must look like 2025/2026",
        );
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassSectionRequest {
    pub lecturer_id: Option<i64>,
    pub capacity: Option<i32>,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub status: Option<SectionStatus>,
}

impl UpdateClassSectionRequest {
    /// 讲师只能修改教室与时间安排
    pub fn touches_only_logistics(&self) -> bool {
        self.lecturer_id.is_none() && self.capacity.is_none() && self.status.is_none()
    }
}

impl Validate for UpdateClassSectionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(capacity) = self.capacity {
            v.range("capacity", capacity, 1, 1000);
        }
        v.optional_length("room", self.room.as_deref(), 1, 64)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_year_format() {
        assert!(is_valid_academic_year("2025/2026"));
        assert!(!is_valid_academic_year("2025/2027"));
        assert!(!is_valid_academic_year("2025-2026"));
    }
}
