use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::dto::PublicEmployeeResponse;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

const DEFAULT_AVATAR: &str = "👨‍💼";

pub async fn list_employees(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let employees = state
        .store
        .list_employees(true)
        .api_err("Failed to list employees")?;

    let items: Vec<PublicEmployeeResponse> = employees
        .into_iter()
        .map(|e| PublicEmployeeResponse {
            id: e.id,
            name: e.name,
            role: e.role,
            experience: e
                .experience_years
                .map(|y| format!("{y} years"))
                .unwrap_or_else(|| "N/A".to_string()),
            specialty: e.specialty,
            avatar: e.avatar_url.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            verified: true,
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(items)))
}
