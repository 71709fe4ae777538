//! 学院、系、专业与课程
//!
//! 四类资源结构相同：编码唯一，删除前检查下级记录。

pub mod courses;
pub mod departments;
pub mod faculties;
pub mod programs;

pub use courses::CourseService;
pub use departments::DepartmentService;
pub use faculties::FacultyService;
pub use programs::ProgramService;

use crate::errors::{CampusError, Result};

/// 编码已被其他记录占用时返回 409
pub(crate) fn ensure_code_available(
    taken_by: Option<i64>,
    current_id: Option<i64>,
    resource: &str,
) -> Result<()> {
    match taken_by {
        Some(id) if Some(id) != current_id => Err(CampusError::conflict(format!(
            "{resource} code already exists"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_taken_by_other_record() {
        assert!(ensure_code_available(None, None, "Course").is_ok());
        assert!(ensure_code_available(Some(3), Some(3), "Course").is_ok());

        let err = ensure_code_available(Some(3), None, "Course").unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::CONFLICT);
        assert!(ensure_code_available(Some(3), Some(4), "Course").is_err());
    }
}
