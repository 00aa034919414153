use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};

use super::parse_upload_multipart;
use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::media::HERO_GALLERY;
use crate::server::AppState;
use crate::server::dto::HeroImageResponse;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

pub async fn upload_hero_images(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // The admin panel sends either a single 'image' part or several 'images'
    let (files, _) = parse_upload_multipart(&mut multipart, &["images", "image"]).await?;
    if files.is_empty() {
        return Err(ApiError::bad_request("No image files provided"));
    }

    let stored = state
        .gallery
        .upload_hero(files)
        .await
        .api_err("Failed to store uploads")?;

    if stored.is_empty() {
        return Err(ApiError::bad_request("No valid image files were uploaded"));
    }

    let images: Vec<HeroImageResponse> = stored
        .into_iter()
        .map(|asset| HeroImageResponse {
            url: state.upload_url(&asset.relative_path),
            alt: asset.alt_text.unwrap_or_default(),
            filename: Some(asset.relative_path),
            id: asset.id,
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(images)))
}

pub async fn delete_hero_image(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> impl IntoResponse {
    match state.gallery.delete_asset(HERO_GALLERY, &image_id).await {
        Ok(_) => Ok::<_, ApiError>(Json(ApiResponse::success(
            "Image deleted successfully".to_string(),
        ))),
        Err(Error::NotFound) => Err(ApiError::not_found("Image not found")),
        Err(_) => Err(ApiError::internal("Failed to delete image")),
    }
}
