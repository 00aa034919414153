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
use crate::server::AppState;
use crate::server::dto::ProjectRequest;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::validate_required_text;
use crate::types::Project;

pub async fn create_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectRequest>,
) -> impl IntoResponse {
    validate_required_text("title", &req.title)?;

    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        category: req.category,
        location: req.location,
        size: req.size,
        year: req.year,
        featured: req.featured,
        status: "active".to_string(),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_project(&project)
        .api_err("Failed to create project")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(project))))
}

pub async fn update_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ProjectRequest>,
) -> impl IntoResponse {
    validate_required_text("title", &req.title)?;

    let existing = state
        .store
        .get_project(&id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    let project = Project {
        title: req.title,
        description: req.description,
        category: req.category,
        location: req.location,
        size: req.size,
        year: req.year,
        featured: req.featured,
        updated_at: Utc::now(),
        ..existing
    };

    state
        .store
        .update_project(&project)
        .api_err("Failed to update project")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(project)))
}

/// Deletes a project with its whole image set: asset rows first, stored
/// files best-effort, then the project row.
pub async fn delete_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let project = state
        .store
        .get_project(&id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    state
        .gallery
        .delete_owner(&project.id)
        .await
        .api_err("Failed to delete project images")?;

    let deleted = state
        .store
        .delete_project(&project.id)
        .api_err("Failed to delete project")?;
    if !deleted {
        return Err(ApiError::not_found("Project not found"));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
