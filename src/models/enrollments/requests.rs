use serde::Deserialize;

use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub class_section_id: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub class_section_id: i64,
    /// 缺省为当前用户（学生自助选课）
    pub student_id: Option<i64>,
}
