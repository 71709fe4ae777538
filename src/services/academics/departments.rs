use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ensure_code_available;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    departments::requests::{
        CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
    },
};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{DepartmentStorage, FacultyStorage, LecturerStorage, ProgramStorage};
use crate::utils::validate::Validate;

crate::services::lazy_service!(
    /// 系管理
    DepartmentService
);

impl DepartmentService {
    pub async fn list_departments(
        &self,
        query: DepartmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let departments = storage.list_departments(query).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            departments,
            "Departments retrieved successfully",
        )))
    }

    pub async fn get_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let department = storage
            .get_department_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Department not found"))?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        )))
    }

    pub async fn create_department(
        &self,
        department: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        department.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        if storage
            .get_faculty_by_id(department.faculty_id)
            .await?
            .is_none()
        {
            return Err(CampusError::validation("Faculty does not exist").into());
        }
        let taken = storage.get_department_by_code(&department.code).await?;
        ensure_code_available(taken.map(|d| d.id), None, "Department")?;

        let department = storage.create_department(department).await?;
        AuditEvent::create("department", department.id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Created().json(ApiResponse::success(
            department,
            "Department created successfully",
        )))
    }

    pub async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        if let Some(code) = &update.code {
            let taken = storage.get_department_by_code(code).await?;
            ensure_code_available(taken.map(|d| d.id), Some(id), "Department")?;
        }

        let department = storage
            .update_department(id, update)
            .await?
            .ok_or_else(|| CampusError::not_found("Department not found"))?;
        AuditEvent::update("department", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        )))
    }

    // 仍有专业或讲师时拒绝删除
    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        storage
            .get_department_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Department not found"))?;
        ensure_unreferenced(
            storage.count_programs_in_department(id).await?,
            "Cannot delete department with existing programs",
        )?;
        ensure_unreferenced(
            storage.count_lecturers_in_department(id).await?,
            "Cannot delete department with assigned lecturers",
        )?;

        storage.delete_department(id).await?;
        AuditEvent::delete("department", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Department deleted successfully",
        )))
    }
}
