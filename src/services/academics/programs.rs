use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ensure_code_available;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    programs::requests::{CreateProgramRequest, ProgramListParams, UpdateProgramRequest},
};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{CourseStorage, DepartmentStorage, ProgramStorage, StudentStorage};
use crate::utils::validate::Validate;

crate::services::lazy_service!(
    /// 专业管理
    ProgramService
);

impl ProgramService {
    pub async fn list_programs(
        &self,
        query: ProgramListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let programs = storage.list_programs(query).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            programs,
            "Programs retrieved successfully",
        )))
    }

    pub async fn get_program(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let program = storage
            .get_program_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Program not found"))?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            program,
            "Program retrieved successfully",
        )))
    }

    pub async fn create_program(
        &self,
        program: CreateProgramRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        program.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        if storage
            .get_department_by_id(program.department_id)
            .await?
            .is_none()
        {
            return Err(CampusError::validation("Department does not exist").into());
        }
        let taken = storage.get_program_by_code(&program.code).await?;
        ensure_code_available(taken.map(|p| p.id), None, "Program")?;

        let program = storage.create_program(program).await?;
        AuditEvent::create("program", program.id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Created().json(ApiResponse::success(
            program,
            "Program created successfully",
        )))
    }

    pub async fn update_program(
        &self,
        id: i64,
        update: UpdateProgramRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        if let Some(code) = &update.code {
            let taken = storage.get_program_by_code(code).await?;
            ensure_code_available(taken.map(|p| p.id), Some(id), "Program")?;
        }

        let program = storage
            .update_program(id, update)
            .await?
            .ok_or_else(|| CampusError::not_found("Program not found"))?;
        AuditEvent::update("program", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            program,
            "Program updated successfully",
        )))
    }

    // 仍有在读学生或课程时拒绝删除
    pub async fn delete_program(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        storage
            .get_program_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Program not found"))?;
        ensure_unreferenced(
            storage.count_active_students_in_program(id).await?,
            "Cannot delete program with active students",
        )?;
        ensure_unreferenced(
            storage.count_courses_in_program(id).await?,
            "Cannot delete program with existing courses",
        )?;

        storage.delete_program(id).await?;
        AuditEvent::delete("program", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Program deleted successfully",
        )))
    }
}
