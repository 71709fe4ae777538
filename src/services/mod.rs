//! 业务服务层
//!
//! 每个模块一个服务结构体，路由层持有其懒加载的全局实例；
//! 每个操作放在独立的文件中，通过 `handle_*` 函数实现。

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{CampusError, Result};
use crate::rbac::{self, AccessScope, Actor};
use crate::storage::Storage;

/// 声明一个从 app data 取存储的服务结构体
macro_rules! lazy_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub fn with_storage(storage: std::sync::Arc<dyn crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> crate::errors::Result<std::sync::Arc<dyn crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => crate::services::storage_from(request),
                }
            }
        }
    };
}

pub(crate) use lazy_service;

pub mod academics;
pub mod assessments;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod class_sections;
pub mod enrollments;
pub mod finance;
pub mod grades;
pub mod lecturers;
pub mod library;
pub mod notifications;
pub mod research;
pub mod students;
pub mod system;
pub mod users;

pub use academics::{CourseService, DepartmentService, FacultyService, ProgramService};
pub use assessments::AssessmentService;
pub use attendance::AttendanceService;
pub use audit_logs::{AuditEvent, AuditLogService};
pub use auth::AuthService;
pub use class_sections::ClassSectionService;
pub use enrollments::EnrollmentService;
pub use finance::FinanceService;
pub use grades::GradeService;
pub use lecturers::LecturerService;
pub use library::LibraryService;
pub use notifications::NotificationService;
pub use research::ResearchService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;

/// 从 app data 取出存储实例
pub(crate) fn storage_from(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| CampusError::internal("Storage is not configured"))
}

/// 客户端 IP（经过代理时取 `X-Forwarded-For`）
pub(crate) fn client_ip(request: &HttpRequest) -> Option<String> {
    request
        .connection_info()
        .realip_remote_addr()
        .map(|ip| ip.to_string())
}

/// 仍有依赖记录时拒绝删除（409）
pub(crate) fn ensure_unreferenced(count: u64, message: &str) -> Result<()> {
    if count > 0 {
        return Err(CampusError::conflict(message));
    }
    Ok(())
}

/// 列表查询的归属条件：完整权限沿用请求的过滤值，仅有 `_own` 权限时固定为当前用户
pub(crate) fn scoped_owner(
    actor: &Actor,
    permission: &str,
    requested: Option<i64>,
) -> Result<Option<i64>> {
    match rbac::list_scope(actor, permission) {
        Some(AccessScope::All) => Ok(requested),
        Some(AccessScope::Own) => Ok(Some(actor.id)),
        None => Err(CampusError::authorization("Insufficient permissions")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::rbac::perm;

    #[test]
    fn test_scoped_owner_pins_own_scope() {
        let student = Actor::new(7, UserRole::Student);
        let lecturer = Actor::new(8, UserRole::Lecturer);
        let librarian = Actor::new(9, UserRole::Librarian);

        assert_eq!(scoped_owner(&student, perm::GRADES_READ, Some(3)).unwrap(), Some(7));
        assert_eq!(scoped_owner(&student, perm::GRADES_READ, None).unwrap(), Some(7));
        assert_eq!(scoped_owner(&lecturer, perm::GRADES_READ, Some(3)).unwrap(), Some(3));
        assert_eq!(scoped_owner(&lecturer, perm::GRADES_READ, None).unwrap(), None);
        assert!(scoped_owner(&librarian, perm::GRADES_READ, None).is_err());
    }

    #[test]
    fn test_unreferenced_guard() {
        assert!(ensure_unreferenced(0, "in use").is_ok());
        let err = ensure_unreferenced(2, "in use").unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::CONFLICT);
    }
}
