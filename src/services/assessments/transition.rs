use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, load_with_section};
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, assessments::requests::TransitionAssessmentRequest};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::AssessmentStorage;

/// draft → published → grading → completed，不能跳步或回退
pub async fn handle_transition(
    service: &AssessmentService,
    id: i64,
    transition_request: TransitionAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let (assessment, section) = load_with_section(storage.as_ref(), id).await?;
    rbac::authorize(&actor, perm::ASSESSMENTS_WRITE, Some(&section))?;

    let target = transition_request.status;
    if !assessment.status.can_transition_to(target) {
        return Err(CampusError::validation(format!(
            "Invalid status transition from {} to {}",
            assessment.status, target
        ))
        .into());
    }

    let updated = storage
        .set_assessment_status(id, target)
        .await?
        .ok_or_else(|| CampusError::not_found("Assessment not found"))?;

    info!(
        "Assessment {} moved from {} to {}",
        id, assessment.status, target
    );
    AuditEvent::new("transition", "assessment")
        .resource_id(id)
        .details(format!("{} -> {}", assessment.status, target))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Assessment status updated successfully",
    )))
}
