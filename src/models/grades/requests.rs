use serde::Deserialize;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub assessment_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub student_id: Option<i64>,
}

/// 录入或更新成绩（同一评估同一学生只有一条）
#[derive(Debug, Clone, Deserialize)]
pub struct RecordGradeRequest {
    pub assessment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub remarks: Option<String>,
}

impl Validate for RecordGradeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.check(
            self.score.is_finite() && self.score >= 0.0,
            "score",
            "score must not be negative",
        )
        .optional_length("remarks", self.remarks.as_deref(), 1, 500);
        v.finish()
    }
}
