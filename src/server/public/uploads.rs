use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::error::Error;
use crate::server::AppState;
use crate::server::response::ApiError;

const MAX_PLACEHOLDER_DIM: u32 = 2000;

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Response {
    let (reader, size) = match state.media.open(&path).await {
        Ok(result) => result,
        Err(Error::NotFound) => {
            return ApiError::not_found("File not found").into_response();
        }
        Err(Error::InvalidArgument(_)) => {
            return ApiError::bad_request("Invalid file path").into_response();
        }
        Err(e) => {
            tracing::warn!("Upload storage error: {e}");
            return ApiError::internal("Storage error").into_response();
        }
    };

    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&path))
        .header(header::CONTENT_LENGTH, size)
        .header("X-Content-Type-Options", "nosniff")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Solid-color stand-in image used until real content is uploaded.
pub async fn placeholder(Path((width, height)): Path<(u32, u32)>) -> Response {
    if width == 0 || height == 0 || width > MAX_PLACEHOLDER_DIM || height > MAX_PLACEHOLDER_DIM {
        return ApiError::bad_request("Invalid placeholder dimensions").into_response();
    }

    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([100, 116, 139]),
    ));

    let mut out = std::io::Cursor::new(Vec::new());
    if let Err(e) = img.write_to(&mut out, image::ImageFormat::Jpeg) {
        tracing::warn!("Placeholder encoding failed: {e}");
        return ApiError::internal("Failed to generate placeholder").into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        out.into_inner(),
    )
        .into_response()
}
