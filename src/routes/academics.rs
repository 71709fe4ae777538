//! 院系、专业与课程路由

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::{
    courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
    departments::requests::{
        CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
    },
    faculties::requests::{CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest},
    programs::requests::{CreateProgramRequest, ProgramListParams, UpdateProgramRequest},
};
use crate::rbac::perm;
use crate::services::{CourseService, DepartmentService, FacultyService, ProgramService};
use crate::utils::SafeIDI64;

static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);
static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);
static PROGRAM_SERVICE: Lazy<ProgramService> = Lazy::new(ProgramService::new_lazy);
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 学院
pub async fn list_faculties(
    req: HttpRequest,
    query: web::Query<FacultyListParams>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.list_faculties(query.into_inner(), &req).await
}

pub async fn get_faculty(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.get_faculty(id.0, &req).await
}

pub async fn create_faculty(
    req: HttpRequest,
    data: web::Json<CreateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.create_faculty(data.into_inner(), &req).await
}

pub async fn update_faculty(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .update_faculty(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_faculty(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.delete_faculty(id.0, &req).await
}

// 系
pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(query.into_inner(), &req)
        .await
}

pub async fn get_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(id.0, &req).await
}

pub async fn create_department(
    req: HttpRequest,
    data: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(data.into_inner(), &req)
        .await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_department(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(id.0, &req).await
}

// 专业
pub async fn list_programs(
    req: HttpRequest,
    query: web::Query<ProgramListParams>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.list_programs(query.into_inner(), &req).await
}

pub async fn get_program(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.get_program(id.0, &req).await
}

pub async fn create_program(
    req: HttpRequest,
    data: web::Json<CreateProgramRequest>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.create_program(data.into_inner(), &req).await
}

pub async fn update_program(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateProgramRequest>,
) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE
        .update_program(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_program(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROGRAM_SERVICE.delete_program(id.0, &req).await
}

// 课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(id.0, &req).await
}

pub async fn create_course(
    req: HttpRequest,
    data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(data.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(id.0, &req).await
}

pub fn configure_academics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/faculties")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_faculties).wrap(Allow::new(perm::FACULTIES_READ)))
                    .route(web::post().to(create_faculty).wrap(Allow::new(perm::FACULTIES_WRITE))),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_faculty).wrap(Allow::new(perm::FACULTIES_READ)))
                    .route(web::put().to(update_faculty).wrap(Allow::new(perm::FACULTIES_WRITE)))
                    .route(
                        web::delete()
                            .to(delete_faculty)
                            .wrap(Allow::new(perm::FACULTIES_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_departments)
                            .wrap(Allow::new(perm::DEPARTMENTS_READ)),
                    )
                    .route(
                        web::post()
                            .to(create_department)
                            .wrap(Allow::new(perm::DEPARTMENTS_WRITE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_department).wrap(Allow::new(perm::DEPARTMENTS_READ)))
                    .route(
                        web::put()
                            .to(update_department)
                            .wrap(Allow::new(perm::DEPARTMENTS_WRITE)),
                    )
                    .route(
                        web::delete()
                            .to(delete_department)
                            .wrap(Allow::new(perm::DEPARTMENTS_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/programs")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_programs).wrap(Allow::new(perm::PROGRAMS_READ)))
                    .route(web::post().to(create_program).wrap(Allow::new(perm::PROGRAMS_WRITE))),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_program).wrap(Allow::new(perm::PROGRAMS_READ)))
                    .route(web::put().to(update_program).wrap(Allow::new(perm::PROGRAMS_WRITE)))
                    .route(
                        web::delete()
                            .to(delete_program)
                            .wrap(Allow::new(perm::PROGRAMS_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_courses).wrap(Allow::new(perm::COURSES_READ)))
                    .route(web::post().to(create_course).wrap(Allow::new(perm::COURSES_WRITE))),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course).wrap(Allow::new(perm::COURSES_READ)))
                    .route(web::put().to(update_course).wrap(Allow::new(perm::COURSES_WRITE)))
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(Allow::new(perm::COURSES_DELETE)),
                    ),
            ),
    );
}
