use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::LecturerService;
use crate::errors::{CampusError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    lecturers::requests::{CreateLecturerRequest, NewLecturer},
    users::{entities::UserRole, requests::NewUser},
};
use crate::services::AuditEvent;
use crate::storage::{DepartmentStorage, LecturerStorage, Storage, UserStorage};
use crate::utils::numbering::{STAFF_NUMBER_PREFIX, next_sequence, staff_number, staff_sequence};
use crate::utils::password::hash_password;
use crate::utils::validate::Validate;

/// 依次写入用户、资料和讲师档案，未指定工号时按 `LEC/<序号>` 生成
pub async fn handle_create_lecturer(
    service: &LecturerService,
    lecturer: CreateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    lecturer.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    if storage
        .get_department_by_id(lecturer.department_id)
        .await?
        .is_none()
    {
        return Err(CampusError::validation("Department does not exist").into());
    }

    let email = lecturer.email.trim().to_lowercase();
    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(CampusError::conflict("Email is already registered").into());
    }

    let number = match lecturer.staff_number {
        Some(number) => {
            if storage.get_lecturer_by_staff_number(&number).await?.is_some() {
                return Err(CampusError::conflict("Staff number already exists").into());
            }
            number
        }
        None => next_staff_number(storage.as_ref()).await?,
    };

    let user = storage
        .create_user(NewUser {
            email,
            password_hash: hash_password(&lecturer.password)?,
            role: UserRole::Lecturer,
            first_name: lecturer.first_name,
            last_name: lecturer.last_name,
            phone: lecturer.phone,
            gender: lecturer.gender,
            date_of_birth: None,
        })
        .await?;
    let user_id = user.user.id;

    let created = match storage
        .create_lecturer(NewLecturer {
            user_id,
            staff_number: number,
            department_id: lecturer.department_id,
            specialization: lecturer.specialization,
            hire_date: lecturer.hire_date,
        })
        .await
    {
        Ok(created) => created,
        Err(e) => {
            if let Err(cleanup) = storage.delete_user(user_id).await {
                warn!("Failed to remove user {} after lecturer creation failed: {}", user_id, cleanup);
            }
            return Err(e.into());
        }
    };

    info!(
        "Lecturer {} created with staff number {}",
        created.id, created.staff_number
    );
    AuditEvent::create("lecturer", created.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    let detail = storage
        .get_lecturer_detail(created.id)
        .await?
        .ok_or_else(|| CampusError::not_found("Lecturer not found"))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        detail,
        "Lecturer created successfully",
    )))
}

// 接在现有最大工号之后
async fn next_staff_number(storage: &dyn Storage) -> Result<String> {
    let existing = storage
        .staff_numbers_with_prefix(STAFF_NUMBER_PREFIX)
        .await?;
    Ok(staff_number(next_sequence(existing, staff_sequence)))
}
