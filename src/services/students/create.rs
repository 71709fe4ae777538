use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{info, warn};

use super::StudentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    students::requests::{CreateStudentRequest, NewStudent},
    users::{entities::UserRole, requests::NewUser},
};
use crate::services::AuditEvent;
use crate::storage::{ProgramStorage, StudentStorage, UserStorage};
use crate::utils::numbering::{
    next_sequence, student_number, student_number_year_suffix, student_sequence,
};
use crate::utils::password::hash_password;
use crate::utils::validate::Validate;

/// 依次写入用户、资料和学生档案
///
/// 学号为 `<专业编码>/<序号>/<入学年份>`，序号接在该专业当年最大的学号之后。
pub async fn handle_create_student(
    service: &StudentService,
    student: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    student.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let program = storage
        .get_program_by_id(student.program_id)
        .await?
        .ok_or_else(|| CampusError::validation("Program does not exist"))?;

    let email = student.email.trim().to_lowercase();
    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(CampusError::conflict("Email is already registered").into());
    }

    let admission_date = student
        .admission_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let existing = storage
        .student_numbers_with_suffix(program.id, &student_number_year_suffix(admission_date))
        .await?;
    let sequence = next_sequence(existing, student_sequence);
    let number = student_number(&program.code, sequence, admission_date);

    let user = storage
        .create_user(NewUser {
            email,
            password_hash: hash_password(&student.password)?,
            role: UserRole::Student,
            first_name: student.first_name,
            last_name: student.last_name,
            phone: student.phone,
            gender: student.gender,
            date_of_birth: student.date_of_birth,
        })
        .await?;
    let user_id = user.user.id;

    let created = storage
        .create_student(NewStudent {
            user_id,
            student_number: number,
            program_id: program.id,
            admission_date,
            year_of_study: student.year_of_study.unwrap_or(1),
        })
        .await;

    // 档案写入失败时撤销刚创建的用户
    let created = match created {
        Ok(created) => created,
        Err(e) => {
            if let Err(cleanup) = storage.delete_user(user_id).await {
                warn!("Failed to remove user {} after student creation failed: {}", user_id, cleanup);
            }
            return Err(e.into());
        }
    };

    info!(
        "Student {} created with number {}",
        created.id, created.student_number
    );
    AuditEvent::create("student", created.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    let detail = storage
        .get_student_detail(created.id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        detail,
        "Student created successfully",
    )))
}
