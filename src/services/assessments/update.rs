use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, load_with_section};
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    assessments::{entities::AssessmentStatus, requests::UpdateAssessmentRequest},
};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::{AssessmentStorage, GradeStorage};
use crate::utils::validate::Validate;

pub async fn handle_update_assessment(
    service: &AssessmentService,
    id: i64,
    update: UpdateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let (assessment, section) = load_with_section(storage.as_ref(), id).await?;
    rbac::authorize(&actor, perm::ASSESSMENTS_WRITE, Some(&section))?;

    if assessment.status == AssessmentStatus::Completed {
        return Err(CampusError::conflict("Completed assessments cannot be modified").into());
    }
    // 已有成绩时不允许改满分
    if update.max_score.is_some() && storage.count_grades_for_assessment(id).await? > 0 {
        return Err(CampusError::conflict(
            "Cannot change max_score after grades have been recorded",
        )
        .into());
    }

    let assessment = storage
        .update_assessment(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Assessment not found"))?;
    AuditEvent::update("assessment", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assessment,
        "Assessment updated successfully",
    )))
}
