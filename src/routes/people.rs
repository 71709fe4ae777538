//! 学生与教师路由

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::{
    lecturers::requests::{CreateLecturerRequest, LecturerListParams, UpdateLecturerRequest},
    students::requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
};
use crate::rbac::perm;
use crate::services::{LecturerService, StudentService};
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static LECTURER_SERVICE: Lazy<LecturerService> = Lazy::new(LecturerService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn create_student(
    req: HttpRequest,
    data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(data.into_inner(), &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

pub async fn list_lecturers(
    req: HttpRequest,
    query: web::Query<LecturerListParams>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .list_lecturers(query.into_inner(), &req)
        .await
}

pub async fn get_lecturer(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.get_lecturer(id.0, &req).await
}

pub async fn create_lecturer(
    req: HttpRequest,
    data: web::Json<CreateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .create_lecturer(data.into_inner(), &req)
        .await
}

pub async fn update_lecturer(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .update_lecturer(id.0, data.into_inner(), &req)
        .await
}

pub fn configure_people_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_students).wrap(Allow::new(perm::STUDENTS_READ)))
                    .route(web::post().to(create_student).wrap(Allow::new(perm::STUDENTS_WRITE))),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_student).wrap(Allow::new(perm::STUDENTS_READ)))
                    .route(web::put().to(update_student).wrap(Allow::new(perm::STUDENTS_WRITE)))
                    .route(
                        web::delete()
                            .to(delete_student)
                            .wrap(Allow::new(perm::STUDENTS_DELETE)),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/lecturers")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_lecturers).wrap(Allow::new(perm::LECTURERS_READ)))
                    .route(
                        web::post()
                            .to(create_lecturer)
                            .wrap(Allow::new(perm::LECTURERS_WRITE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_lecturer).wrap(Allow::new(perm::LECTURERS_READ)))
                    .route(
                        web::put()
                            .to(update_lecturer)
                            .wrap(Allow::new(perm::LECTURERS_WRITE)),
                    ),
            ),
    );
}
