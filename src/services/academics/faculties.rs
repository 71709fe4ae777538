use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ensure_code_available;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    faculties::requests::{CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest},
};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{DepartmentStorage, FacultyStorage};
use crate::utils::validate::Validate;

crate::services::lazy_service!(
    /// 学院管理
    FacultyService
);

impl FacultyService {
    pub async fn list_faculties(
        &self,
        query: FacultyListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let faculties = storage.list_faculties(query).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            faculties,
            "Faculties retrieved successfully",
        )))
    }

    pub async fn get_faculty(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let faculty = storage
            .get_faculty_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Faculty not found"))?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            faculty,
            "Faculty retrieved successfully",
        )))
    }

    pub async fn create_faculty(
        &self,
        faculty: CreateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        faculty.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        let taken = storage.get_faculty_by_code(&faculty.code).await?;
        ensure_code_available(taken.map(|f| f.id), None, "Faculty")?;

        let faculty = storage.create_faculty(faculty).await?;
        AuditEvent::create("faculty", faculty.id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Created().json(ApiResponse::success(
            faculty,
            "Faculty created successfully",
        )))
    }

    pub async fn update_faculty(
        &self,
        id: i64,
        update: UpdateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update.validate()?;
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        if let Some(code) = &update.code {
            let taken = storage.get_faculty_by_code(code).await?;
            ensure_code_available(taken.map(|f| f.id), Some(id), "Faculty")?;
        }

        let faculty = storage
            .update_faculty(id, update)
            .await?
            .ok_or_else(|| CampusError::not_found("Faculty not found"))?;
        AuditEvent::update("faculty", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            faculty,
            "Faculty updated successfully",
        )))
    }

    // 仍有系时拒绝删除
    pub async fn delete_faculty(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let actor = RequireJWT::extract_actor(request)?;
        let storage = self.get_storage(request)?;

        storage
            .get_faculty_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Faculty not found"))?;
        ensure_unreferenced(
            storage.count_departments_in_faculty(id).await?,
            "Cannot delete faculty with existing departments",
        )?;

        storage.delete_faculty(id).await?;
        AuditEvent::delete("faculty", id)
            .record(storage.as_ref(), request, Some(actor.id))
            .await;

        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Faculty deleted successfully",
        )))
    }
}
