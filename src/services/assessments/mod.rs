pub mod create;
pub mod delete;
pub mod get;
pub mod transition;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{CampusError, Result};
use crate::models::assessments::{
    entities::Assessment,
    requests::{
        AssessmentListParams, CreateAssessmentRequest, TransitionAssessmentRequest,
        UpdateAssessmentRequest,
    },
};
use crate::models::class_sections::entities::ClassSection;
use crate::storage::{AssessmentStorage, ClassSectionStorage, Storage};

crate::services::lazy_service!(
    /// 考核管理，由班级讲师维护
    AssessmentService
);

impl AssessmentService {
    pub async fn list_assessments(
        &self,
        query: AssessmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_list_assessments(self, query, request).await
    }

    pub async fn get_assessment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_assessment(self, id, request).await
    }

    pub async fn create_assessment(
        &self,
        assessment: CreateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_assessment(self, assessment, request).await
    }

    pub async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_assessment(self, id, update, request).await
    }

    // 状态只能前进到下一步
    pub async fn transition_assessment(
        &self,
        id: i64,
        transition_request: TransitionAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transition::handle_transition(self, id, transition_request, request).await
    }

    pub async fn delete_assessment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_assessment(self, id, request).await
    }
}

/// 取出考核及其所属班级，归属判断以班级讲师为准
pub(crate) async fn load_with_section(
    storage: &dyn Storage,
    id: i64,
) -> Result<(Assessment, ClassSection)> {
    let assessment = storage
        .get_assessment_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Assessment not found"))?;
    let section = storage
        .get_class_section_by_id(assessment.class_section_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Class section not found"))?;
    Ok((assessment, section))
}
