pub mod enroll;
pub mod list;
pub mod withdraw;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::enrollments::requests::{EnrollRequest, EnrollmentListParams};

crate::services::lazy_service!(
    /// 选课与退课
    EnrollmentService
);

impl EnrollmentService {
    // 学生只能看到自己的选课
    pub async fn list_enrollments(
        &self,
        query: EnrollmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_enrollments(self, query, request).await
    }

    pub async fn get_enrollment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_get_enrollment(self, id, request).await
    }

    pub async fn enroll(
        &self,
        enroll_request: EnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_enroll(self, enroll_request, request).await
    }

    pub async fn drop_enrollment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        withdraw::handle_drop(self, id, request).await
    }
}
