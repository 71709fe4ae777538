use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ensure_code_available;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
};
use crate::rbac::{self, AccessScope, perm};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{ClassSectionStorage, CourseStorage, ProgramStorage};
use crate::utils::validate::Validate;

crate::services::lazy_service!(
    /// 课程管理
    CourseService
);

impl CourseService {
    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let courses = storage.list_courses(query).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            courses,
            "Courses retrieved successfully",
        )))
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let course = storage
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Course not found"))?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course retrieved successfully",
        )))
    }

    pub async fn create_course(
        &self,
        course: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        course.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        rbac::authorize(&actor, perm::COURSES_WRITE, None)?;
        let storage = self.get_storage(request)?;

        if storage.get_program_by_id(course.program_id).await?.is_none() {
            return Err(CampusError::validation("Program does not exist").into());
        }
        let taken = storage.get_course_by_code(&course.code).await?;
        ensure_code_available(taken.map(|c| c.id), None, "Course")?;

        let course = storage.create_course(course).await?;
        AuditEvent::create("course", course.id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Created().json(ApiResponse::success(
            course,
            "Course created successfully",
        )))
    }

    /// 负责讲师只能修改自己课程的内容字段
    pub async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        let course = storage
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Course not found"))?;
        rbac::authorize(&actor, perm::COURSES_WRITE, Some(&course))?;
        if rbac::list_scope(&actor, perm::COURSES_WRITE) == Some(AccessScope::Own)
            && !update.touches_only_content()
        {
            return Err(CampusError::authorization(
                "Lecturers may only update course content",
            )
            .into());
        }

        if let Some(code) = &update.code {
            let taken = storage.get_course_by_code(code).await?;
            ensure_code_available(taken.map(|c| c.id), Some(id), "Course")?;
        }

        let course = storage
            .update_course(id, update)
            .await?
            .ok_or_else(|| CampusError::not_found("Course not found"))?;
        AuditEvent::update("course", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        )))
    }

    // 仍有开课班级时拒绝删除
    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        storage
            .get_course_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Course not found"))?;
        ensure_unreferenced(
            storage.count_class_sections_for_course(id).await?,
            "Cannot delete course with existing class sections",
        )?;

        storage.delete_course(id).await?;
        AuditEvent::delete("course", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Course deleted successfully",
        )))
    }
}
