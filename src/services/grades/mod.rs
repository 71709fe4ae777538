pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::grades::requests::{GradeListParams, RecordGradeRequest};

crate::services::lazy_service!(
    /// 成绩录入与查询
    GradeService
);

impl GradeService {
    // 录入或修改成绩，等级按得分率计算
    pub async fn record_grade(
        &self,
        grade: RecordGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_record_grade(self, grade, request).await
    }

    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_grades(self, query, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_get_grade(self, id, request).await
    }
}
