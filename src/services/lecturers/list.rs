use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, lecturers::requests::LecturerListParams};
use crate::rbac::{self, perm};
use crate::storage::LecturerStorage;

pub async fn handle_list_lecturers(
    service: &LecturerService,
    query: LecturerListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    rbac::authorize(&RequireJWT::extract_actor(request)?, perm::LECTURERS_READ, None)?;

    let storage = service.get_storage(request)?;
    let lecturers = storage.list_lecturers(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        lecturers,
        "Lecturers retrieved successfully",
    )))
}
