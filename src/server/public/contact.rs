use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::server::AppState;
use crate::server::dto::ContactRequest;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::{validate_email, validate_required_text};
use crate::types::Contact;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> impl IntoResponse {
    validate_required_text("name", &req.name)?;
    validate_email(&req.email)?;

    let contact = Contact {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
        message: req.message,
        status: "new".to_string(),
        created_at: Utc::now(),
    };

    state
        .store
        .create_contact(&contact)
        .api_err("Failed to save contact submission")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(contact))))
}
