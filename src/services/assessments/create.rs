use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, assessments::requests::CreateAssessmentRequest};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::{AssessmentStorage, ClassSectionStorage};
use crate::utils::validate::Validate;

pub async fn handle_create_assessment(
    service: &AssessmentService,
    assessment: CreateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    assessment.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let section = storage
        .get_class_section_by_id(assessment.class_section_id)
        .await?
        .ok_or_else(|| CampusError::validation("Class section does not exist"))?;
    rbac::authorize(&actor, perm::ASSESSMENTS_WRITE, Some(&section))?;

    let assessment = storage.create_assessment(assessment, actor.id).await?;
    AuditEvent::create("assessment", assessment.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        assessment,
        "Assessment created successfully",
    )))
}
