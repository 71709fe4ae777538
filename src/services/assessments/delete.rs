use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, load_with_section};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::rbac::{self, perm};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{AssessmentStorage, GradeStorage};

pub async fn handle_delete_assessment(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let (_, section) = load_with_section(storage.as_ref(), id).await?;
    rbac::authorize(&actor, perm::ASSESSMENTS_DELETE, Some(&section))?;
    ensure_unreferenced(
        storage.count_grades_for_assessment(id).await?,
        "Cannot delete assessment with recorded grades",
    )?;

    storage.delete_assessment(id).await?;
    AuditEvent::delete("assessment", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Assessment deleted successfully",
    )))
}
