use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{ImageResponse, ListProjectsParams, ProjectDetailResponse, ProjectListItem};
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::store::ProjectFilter;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProjectsParams>,
) -> impl IntoResponse {
    let filter = ProjectFilter {
        active_only: true,
        featured_only: params.featured.as_deref().is_some_and(|f| !f.is_empty()),
        category: params
            .category
            .filter(|c| !c.is_empty() && c.as_str() != "all"),
        limit: params.limit,
    };

    let projects = state
        .store
        .list_projects(&filter)
        .api_err("Failed to list projects")?;

    let items: Vec<ProjectListItem> = projects
        .into_iter()
        .map(|summary| {
            let url = summary.main_image.as_deref().map(|p| state.upload_url(p));
            ProjectListItem {
                project: summary.project,
                main_image: url.clone(),
                image: url,
            }
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(items)))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let project = state
        .store
        .get_project(&id)
        .api_err("Failed to get project")?
        .filter(|p| p.status == "active")
        .or_not_found("Project not found")?;

    let assets = state
        .store
        .list_assets(&project.id)
        .api_err("Failed to list project images")?;

    let mut main_image = None;
    let images: Vec<ImageResponse> = assets
        .into_iter()
        .map(|asset| {
            let url = state.upload_url(&asset.relative_path);
            if asset.is_main {
                main_image = Some(url.clone());
            }
            ImageResponse {
                id: asset.id,
                url,
                path: asset.relative_path,
                name: asset.original_name,
                is_main: asset.is_main,
                created_at: asset.created_at,
            }
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(ProjectDetailResponse {
        project,
        images,
        main_image,
    })))
}
