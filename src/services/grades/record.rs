use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    enrollments::entities::EnrollmentStatus,
    grades::{entities::letter_for, requests::RecordGradeRequest},
};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::services::assessments::load_with_section;
use crate::storage::{EnrollmentStorage, GradeStorage};
use crate::utils::validate::Validate;

pub async fn handle_record_grade(
    service: &GradeService,
    grade: RecordGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    grade.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let (assessment, section) = load_with_section(storage.as_ref(), grade.assessment_id).await?;
    rbac::authorize(&actor, perm::GRADES_WRITE, Some(&section))?;

    if !assessment.status.accepts_grades() {
        return Err(CampusError::validation(format!(
            "Grades cannot be recorded while the assessment is {}",
            assessment.status
        ))
        .into());
    }
    if grade.score > assessment.max_score {
        return Err(CampusError::validation(format!(
            "Score cannot exceed the maximum of {}",
            assessment.max_score
        ))
        .into());
    }

    // 退课学生不能录入成绩
    let enrolled = storage
        .find_enrollment(grade.student_id, section.id)
        .await?
        .is_some_and(|e| e.status != EnrollmentStatus::Dropped);
    if !enrolled {
        return Err(CampusError::validation(
            "Student is not enrolled in this class section",
        )
        .into());
    }

    let letter = letter_for(grade.score, assessment.max_score);
    let recorded = storage
        .upsert_grade(
            assessment.id,
            grade.student_id,
            grade.score,
            letter,
            grade.remarks,
            actor.id,
        )
        .await?;

    AuditEvent::new("record", "grade")
        .resource_id(recorded.id)
        .details(format!("{} ({})", recorded.score, recorded.letter))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        recorded,
        "Grade recorded successfully",
    )))
}
