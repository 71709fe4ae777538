//! 业务数据模型
//!
//! 每个模块下 `entities` 是对外返回的业务实体，`requests` 是请求体与查询参数。

pub mod common;

pub mod assessments;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod class_sections;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod faculties;
pub mod finance;
pub mod grades;
pub mod lecturers;
pub mod library;
pub mod notifications;
pub mod programs;
pub mod research;
pub mod students;
pub mod system;
pub mod users;

pub use common::{
    ApiResponse, AppStartTime, FieldError, PaginatedResponse, PaginationInfo, PaginationQuery,
};
