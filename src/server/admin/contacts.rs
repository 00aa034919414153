use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

pub async fn list_contacts(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let contacts = state
        .store
        .list_contacts()
        .api_err("Failed to list contacts")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(contacts)))
}
