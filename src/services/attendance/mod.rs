pub mod list;
pub mod record;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryQuery, RecordAttendanceRequest,
};

crate::services::lazy_service!(
    /// 考勤登记与查询
    AttendanceService
);

impl AttendanceService {
    // 班级讲师按日期批量登记
    pub async fn record_attendance(
        &self,
        attendance: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_record_attendance(self, attendance, request).await
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_attendance(self, query, request).await
    }

    pub async fn attendance_summary(
        &self,
        query: AttendanceSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::handle_attendance_summary(self, query, request).await
    }
}
