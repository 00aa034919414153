use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::EmployeeRequest;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_required_text;
use crate::types::Employee;

pub async fn list_employees(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let employees = state
        .store
        .list_employees(false)
        .api_err("Failed to list employees")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(employees)))
}

pub async fn create_employee(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmployeeRequest>,
) -> impl IntoResponse {
    validate_required_text("name", &req.name)?;

    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        role: req.role,
        experience_years: req.experience_years,
        specialty: req.specialty,
        bio: req.bio,
        email: req.email,
        phone: req.phone,
        avatar_url: req.avatar_url,
        display_order: req.display_order,
        is_active: req.is_active,
        created_at: Utc::now(),
    };

    state
        .store
        .create_employee(&employee)
        .api_err("Failed to create employee")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(employee))))
}

pub async fn update_employee(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<EmployeeRequest>,
) -> impl IntoResponse {
    validate_required_text("name", &req.name)?;

    let employee = Employee {
        id,
        name: req.name,
        role: req.role,
        experience_years: req.experience_years,
        specialty: req.specialty,
        bio: req.bio,
        email: req.email,
        phone: req.phone,
        avatar_url: req.avatar_url,
        display_order: req.display_order,
        is_active: req.is_active,
        created_at: Utc::now(), // not persisted on update
    };

    match state.store.update_employee(&employee) {
        Ok(()) => Ok::<_, ApiError>(Json(ApiResponse::success(employee))),
        Err(Error::NotFound) => Err(ApiError::not_found("Employee not found")),
        Err(_) => Err(ApiError::internal("Failed to update employee")),
    }
}

pub async fn delete_employee(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_employee(&id)
        .api_err("Failed to delete employee")?;

    if !deleted {
        return Err(ApiError::not_found("Employee not found"));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
