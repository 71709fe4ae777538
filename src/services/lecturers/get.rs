use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::rbac::{self, perm};
use crate::storage::LecturerStorage;

pub async fn handle_get_lecturer(
    service: &LecturerService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let lecturer = storage
        .get_lecturer_detail(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Lecturer not found"))?;
    rbac::authorize(&actor, perm::LECTURERS_READ, Some(&lecturer))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        lecturer,
        "Lecturer retrieved successfully",
    )))
}
