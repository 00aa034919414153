use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};

use super::parse_upload_multipart;
use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::{ImageResponse, UploadBatchResponse, UploadedFileResponse};
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};

pub async fn upload_images(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let project = state
        .store
        .get_project(&id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    let (files, is_main) = parse_upload_multipart(&mut multipart, &["files"]).await?;
    if files.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }

    let stored = state
        .gallery
        .upload_batch(&project.id, files, is_main)
        .await
        .api_err("Failed to store uploads")?;

    let files: Vec<UploadedFileResponse> = stored
        .iter()
        .map(|asset| UploadedFileResponse {
            filename: asset
                .relative_path
                .rsplit('/')
                .next()
                .unwrap_or(&asset.relative_path)
                .to_string(),
            original_name: asset.original_name.clone(),
            path: asset.relative_path.clone(),
            is_main: asset.is_main,
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(UploadBatchResponse {
        message: format!("{} files uploaded successfully", files.len()),
        files,
    })))
}

pub async fn list_images(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let assets = state
        .store
        .list_assets(&id)
        .api_err("Failed to list project images")?;

    let images: Vec<ImageResponse> = assets
        .into_iter()
        .map(|asset| ImageResponse {
            url: state.upload_url(&asset.relative_path),
            id: asset.id,
            path: asset.relative_path,
            name: asset.original_name,
            is_main: asset.is_main,
            created_at: asset.created_at,
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(images)))
}

pub async fn delete_image(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path((id, image_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.gallery.delete_asset(&id, &image_id).await {
        Ok(_) => Ok::<_, ApiError>(Json(ApiResponse::success(
            "Image deleted successfully".to_string(),
        ))),
        Err(Error::NotFound) => Err(ApiError::not_found("Image not found")),
        Err(_) => Err(ApiError::internal("Failed to delete image")),
    }
}

pub async fn set_main_image(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path((id, image_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.gallery.set_main(&id, &image_id) {
        Ok(()) => Ok::<_, ApiError>(Json(ApiResponse::success(
            "Main image updated successfully".to_string(),
        ))),
        Err(Error::NotFound) => Err(ApiError::not_found("Image not found")),
        Err(_) => Err(ApiError::internal("Failed to update main image")),
    }
}
