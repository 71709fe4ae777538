use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, students::requests::UpdateStudentRequest};
use crate::services::AuditEvent;
use crate::storage::{ProgramStorage, StudentStorage};
use crate::utils::validate::Validate;

pub async fn handle_update_student(
    service: &StudentService,
    id: i64,
    update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    if let Some(program_id) = update.program_id
        && storage.get_program_by_id(program_id).await?.is_none()
    {
        return Err(CampusError::validation("Program does not exist").into());
    }

    let student = storage
        .update_student(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;
    AuditEvent::update("student", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student updated successfully",
    )))
}
