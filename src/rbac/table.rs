//! 角色 → 权限静态表
//!
//! 权限字符串格式为 `resource:action`，`resource:action_own` 表示仅限本人资源。

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::models::users::entities::UserRole;

pub mod perm {
    pub const USERS_READ: &str = "users:read";
    pub const USERS_WRITE: &str = "users:write";
    pub const USERS_DELETE: &str = "users:delete";

    pub const FACULTIES_READ: &str = "faculties:read";
    pub const FACULTIES_WRITE: &str = "faculties:write";
    pub const FACULTIES_DELETE: &str = "faculties:delete";

    pub const DEPARTMENTS_READ: &str = "departments:read";
    pub const DEPARTMENTS_WRITE: &str = "departments:write";
    pub const DEPARTMENTS_DELETE: &str = "departments:delete";

    pub const PROGRAMS_READ: &str = "programs:read";
    pub const PROGRAMS_WRITE: &str = "programs:write";
    pub const PROGRAMS_DELETE: &str = "programs:delete";

    pub const COURSES_READ: &str = "courses:read";
    pub const COURSES_WRITE: &str = "courses:write";
    pub const COURSES_DELETE: &str = "courses:delete";

    pub const STUDENTS_READ: &str = "students:read";
    pub const STUDENTS_WRITE: &str = "students:write";
    pub const STUDENTS_DELETE: &str = "students:delete";

    pub const LECTURERS_READ: &str = "lecturers:read";
    pub const LECTURERS_WRITE: &str = "lecturers:write";
    pub const LECTURERS_DELETE: &str = "lecturers:delete";

    pub const CLASS_SECTIONS_READ: &str = "class_sections:read";
    pub const CLASS_SECTIONS_WRITE: &str = "class_sections:write";
    pub const CLASS_SECTIONS_DELETE: &str = "class_sections:delete";

    pub const ENROLLMENTS_READ: &str = "enrollments:read";
    pub const ENROLLMENTS_WRITE: &str = "enrollments:write";
    pub const ENROLLMENTS_DELETE: &str = "enrollments:delete";

    pub const ATTENDANCE_READ: &str = "attendance:read";
    pub const ATTENDANCE_WRITE: &str = "attendance:write";

    pub const ASSESSMENTS_READ: &str = "assessments:read";
    pub const ASSESSMENTS_WRITE: &str = "assessments:write";
    pub const ASSESSMENTS_DELETE: &str = "assessments:delete";

    pub const GRADES_READ: &str = "grades:read";
    pub const GRADES_WRITE: &str = "grades:write";

    pub const FEE_STRUCTURES_READ: &str = "fee_structures:read";
    pub const FEE_STRUCTURES_WRITE: &str = "fee_structures:write";
    pub const FEE_STRUCTURES_DELETE: &str = "fee_structures:delete";

    pub const INVOICES_READ: &str = "invoices:read";
    pub const INVOICES_WRITE: &str = "invoices:write";
    pub const INVOICES_DELETE: &str = "invoices:delete";

    pub const PAYMENTS_READ: &str = "payments:read";
    pub const PAYMENTS_WRITE: &str = "payments:write";

    pub const LIBRARY_ITEMS_READ: &str = "library_items:read";
    pub const LIBRARY_ITEMS_WRITE: &str = "library_items:write";
    pub const LIBRARY_ITEMS_DELETE: &str = "library_items:delete";

    pub const LOANS_READ: &str = "loans:read";
    pub const LOANS_WRITE: &str = "loans:write";
    pub const LOANS_DELETE: &str = "loans:delete";

    pub const RESEARCH_READ: &str = "research:read";
    pub const RESEARCH_CREATE: &str = "research:create";
    pub const RESEARCH_WRITE: &str = "research:write";
    pub const RESEARCH_DELETE: &str = "research:delete";

    pub const NOTIFICATIONS_READ: &str = "notifications:read";
    pub const NOTIFICATIONS_WRITE: &str = "notifications:write";

    pub const AUDIT_LOGS_READ: &str = "audit_logs:read";
}

use perm::*;

/// 管理员拥有所有非 `_own` 权限
const ADMIN_PERMISSIONS: &[&str] = &[
    USERS_READ,
    USERS_WRITE,
    USERS_DELETE,
    FACULTIES_READ,
    FACULTIES_WRITE,
    FACULTIES_DELETE,
    DEPARTMENTS_READ,
    DEPARTMENTS_WRITE,
    DEPARTMENTS_DELETE,
    PROGRAMS_READ,
    PROGRAMS_WRITE,
    PROGRAMS_DELETE,
    COURSES_READ,
    COURSES_WRITE,
    COURSES_DELETE,
    STUDENTS_READ,
    STUDENTS_WRITE,
    STUDENTS_DELETE,
    LECTURERS_READ,
    LECTURERS_WRITE,
    LECTURERS_DELETE,
    CLASS_SECTIONS_READ,
    CLASS_SECTIONS_WRITE,
    CLASS_SECTIONS_DELETE,
    ENROLLMENTS_READ,
    ENROLLMENTS_WRITE,
    ENROLLMENTS_DELETE,
    ATTENDANCE_READ,
    ATTENDANCE_WRITE,
    ASSESSMENTS_READ,
    ASSESSMENTS_WRITE,
    ASSESSMENTS_DELETE,
    GRADES_READ,
    GRADES_WRITE,
    FEE_STRUCTURES_READ,
    FEE_STRUCTURES_WRITE,
    FEE_STRUCTURES_DELETE,
    INVOICES_READ,
    INVOICES_WRITE,
    INVOICES_DELETE,
    PAYMENTS_READ,
    PAYMENTS_WRITE,
    LIBRARY_ITEMS_READ,
    LIBRARY_ITEMS_WRITE,
    LIBRARY_ITEMS_DELETE,
    LOANS_READ,
    LOANS_WRITE,
    LOANS_DELETE,
    RESEARCH_READ,
    RESEARCH_CREATE,
    RESEARCH_WRITE,
    RESEARCH_DELETE,
    NOTIFICATIONS_READ,
    NOTIFICATIONS_WRITE,
    AUDIT_LOGS_READ,
];

const LECTURER_PERMISSIONS: &[&str] = &[
    "users:read_own",
    "users:write_own",
    FACULTIES_READ,
    DEPARTMENTS_READ,
    PROGRAMS_READ,
    COURSES_READ,
    "courses:write_own",
    STUDENTS_READ,
    "lecturers:read_own",
    "lecturers:write_own",
    CLASS_SECTIONS_READ,
    "class_sections:write_own",
    ENROLLMENTS_READ,
    ATTENDANCE_READ,
    "attendance:write_own",
    ASSESSMENTS_READ,
    "assessments:write_own",
    "assessments:delete_own",
    GRADES_READ,
    "grades:write_own",
    LIBRARY_ITEMS_READ,
    "loans:read_own",
    RESEARCH_READ,
    RESEARCH_CREATE,
    "research:write_own",
    "research:delete_own",
    "notifications:read_own",
    "notifications:write_own",
];

const STUDENT_PERMISSIONS: &[&str] = &[
    "users:read_own",
    "users:write_own",
    FACULTIES_READ,
    DEPARTMENTS_READ,
    PROGRAMS_READ,
    COURSES_READ,
    "students:read_own",
    CLASS_SECTIONS_READ,
    "enrollments:read_own",
    "enrollments:write_own",
    "enrollments:delete_own",
    "attendance:read_own",
    ASSESSMENTS_READ,
    "grades:read_own",
    FEE_STRUCTURES_READ,
    "invoices:read_own",
    "payments:read_own",
    "payments:write_own",
    LIBRARY_ITEMS_READ,
    "loans:read_own",
    RESEARCH_READ,
    "notifications:read_own",
    "notifications:write_own",
];

const FINANCE_PERMISSIONS: &[&str] = &[
    "users:read_own",
    "users:write_own",
    PROGRAMS_READ,
    STUDENTS_READ,
    FEE_STRUCTURES_READ,
    FEE_STRUCTURES_WRITE,
    FEE_STRUCTURES_DELETE,
    INVOICES_READ,
    INVOICES_WRITE,
    INVOICES_DELETE,
    PAYMENTS_READ,
    PAYMENTS_WRITE,
    "notifications:read_own",
    "notifications:write_own",
];

const LIBRARIAN_PERMISSIONS: &[&str] = &[
    "users:read_own",
    "users:write_own",
    STUDENTS_READ,
    LECTURERS_READ,
    LIBRARY_ITEMS_READ,
    LIBRARY_ITEMS_WRITE,
    LIBRARY_ITEMS_DELETE,
    LOANS_READ,
    LOANS_WRITE,
    LOANS_DELETE,
    "notifications:read_own",
    "notifications:write_own",
];

const IT_PERMISSIONS: &[&str] = &[
    USERS_READ,
    USERS_WRITE,
    USERS_DELETE,
    FACULTIES_READ,
    DEPARTMENTS_READ,
    PROGRAMS_READ,
    NOTIFICATIONS_READ,
    NOTIFICATIONS_WRITE,
    AUDIT_LOGS_READ,
];

static ROLE_PERMISSIONS: Lazy<HashMap<UserRole, HashSet<&'static str>>> = Lazy::new(|| {
    [
        (UserRole::Admin, ADMIN_PERMISSIONS),
        (UserRole::Lecturer, LECTURER_PERMISSIONS),
        (UserRole::Student, STUDENT_PERMISSIONS),
        (UserRole::Finance, FINANCE_PERMISSIONS),
        (UserRole::Librarian, LIBRARIAN_PERMISSIONS),
        (UserRole::It, IT_PERMISSIONS),
    ]
    .into_iter()
    .map(|(role, permissions)| (role, permissions.iter().copied().collect()))
    .collect()
});

/// 获取角色的权限集合
pub fn permissions_for(role: UserRole) -> &'static HashSet<&'static str> {
    static EMPTY: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);
    ROLE_PERMISSIONS.get(&role).unwrap_or(&EMPTY)
}

/// 角色是否直接持有该权限字符串
pub fn role_holds(role: UserRole, permission: &str) -> bool {
    permissions_for(role).contains(permission)
}
