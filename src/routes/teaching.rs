//! 教学班、选课、考勤、考核与成绩路由

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::{
    assessments::requests::{
        AssessmentListParams, CreateAssessmentRequest, TransitionAssessmentRequest,
        UpdateAssessmentRequest,
    },
    attendance::requests::{AttendanceListParams, AttendanceSummaryQuery, RecordAttendanceRequest},
    class_sections::requests::{
        ClassSectionListParams, CreateClassSectionRequest, UpdateClassSectionRequest,
    },
    enrollments::requests::{EnrollRequest, EnrollmentListParams},
    grades::requests::{GradeListParams, RecordGradeRequest},
};
use crate::rbac::perm;
use crate::services::{
    AssessmentService, AttendanceService, ClassSectionService, EnrollmentService, GradeService,
};
use crate::utils::SafeIDI64;

static CLASS_SECTION_SERVICE: Lazy<ClassSectionService> =
    Lazy::new(ClassSectionService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 教学班
pub async fn list_class_sections(
    req: HttpRequest,
    query: web::Query<ClassSectionListParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE
        .list_class_sections(query.into_inner(), &req)
        .await
}

pub async fn get_class_section(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE.get_class_section(id.0, &req).await
}

pub async fn create_class_section(
    req: HttpRequest,
    data: web::Json<CreateClassSectionRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE
        .create_class_section(data.into_inner(), &req)
        .await
}

pub async fn update_class_section(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateClassSectionRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE
        .update_class_section(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_class_section(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE.delete_class_section(id.0, &req).await
}

// 选课
pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

pub async fn get_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_enrollment(id.0, &req).await
}

pub async fn enroll(
    req: HttpRequest,
    data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(data.into_inner(), &req).await
}

pub async fn drop_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.drop_enrollment(id.0, &req).await
}

// 考勤
pub async fn record_attendance(
    req: HttpRequest,
    data: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(data.into_inner(), &req)
        .await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn attendance_summary(
    req: HttpRequest,
    query: web::Query<AttendanceSummaryQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_summary(query.into_inner(), &req)
        .await
}

// 考核
pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(query.into_inner(), &req)
        .await
}

pub async fn get_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(id.0, &req).await
}

pub async fn create_assessment(
    req: HttpRequest,
    data: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(data.into_inner(), &req)
        .await
}

pub async fn update_assessment(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(id.0, data.into_inner(), &req)
        .await
}

pub async fn transition_assessment(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<TransitionAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .transition_assessment(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assessment(id.0, &req).await
}

// 成绩
pub async fn record_grade(
    req: HttpRequest,
    data: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grade(data.into_inner(), &req).await
}

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(id.0, &req).await
}

pub fn configure_teaching_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/class-sections")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_class_sections)
                            .wrap(Allow::new(perm::CLASS_SECTIONS_READ)),
                    )
                    .route(
                        web::post()
                            .to(create_class_section)
                            .wrap(Allow::new(perm::CLASS_SECTIONS_WRITE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_class_section)
                            .wrap(Allow::new(perm::CLASS_SECTIONS_READ)),
                    )
                    .route(
                        web::put()
                            .to(update_class_section)
                            .wrap(Allow::new(perm::CLASS_SECTIONS_WRITE)),
                    )
                    .route(
                        web::delete()
                            .to(delete_class_section)
                            .wrap(Allow::new(perm::CLASS_SECTIONS_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_enrollments)
                            .wrap(Allow::new(perm::ENROLLMENTS_READ)),
                    )
                    .route(web::post().to(enroll).wrap(Allow::new(perm::ENROLLMENTS_WRITE))),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_enrollment).wrap(Allow::new(perm::ENROLLMENTS_READ)))
                    .route(
                        web::delete()
                            .to(drop_enrollment)
                            .wrap(Allow::new(perm::ENROLLMENTS_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance).wrap(Allow::new(perm::ATTENDANCE_READ)))
                    .route(
                        web::post()
                            .to(record_attendance)
                            .wrap(Allow::new(perm::ATTENDANCE_WRITE)),
                    ),
            )
            .route(
                "/summary",
                web::get()
                    .to(attendance_summary)
                    .wrap(Allow::new(perm::ATTENDANCE_READ)),
            ),
    )
    .service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_assessments)
                            .wrap(Allow::new(perm::ASSESSMENTS_READ)),
                    )
                    .route(
                        web::post()
                            .to(create_assessment)
                            .wrap(Allow::new(perm::ASSESSMENTS_WRITE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assessment).wrap(Allow::new(perm::ASSESSMENTS_READ)))
                    .route(
                        web::put()
                            .to(update_assessment)
                            .wrap(Allow::new(perm::ASSESSMENTS_WRITE)),
                    )
                    .route(
                        web::delete()
                            .to(delete_assessment)
                            .wrap(Allow::new(perm::ASSESSMENTS_DELETE)),
                    ),
            )
            .route(
                "/{id}/status",
                web::patch()
                    .to(transition_assessment)
                    .wrap(Allow::new(perm::ASSESSMENTS_WRITE)),
            ),
    )
    .service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_grades).wrap(Allow::new(perm::GRADES_READ)))
                    .route(web::post().to(record_grade).wrap(Allow::new(perm::GRADES_WRITE))),
            )
            .route(
                "/{id}",
                web::get().to(get_grade).wrap(Allow::new(perm::GRADES_READ)),
            ),
    );
}
