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
use crate::server::dto::ContactCardRequest;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_required_text;
use crate::types::ContactCard;

pub async fn list_contact_cards(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let cards = state
        .store
        .list_contact_cards(false)
        .api_err("Failed to list contact cards")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(cards)))
}

pub async fn create_contact_card(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactCardRequest>,
) -> impl IntoResponse {
    validate_required_text("title", &req.title)?;

    let card = ContactCard {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        details: req.details,
        sub_details: req.sub_details,
        contact_type: req.contact_type,
        icon_emoji: req.icon_emoji,
        display_order: req.display_order,
        is_active: req.is_active,
        created_at: Utc::now(),
    };

    state
        .store
        .create_contact_card(&card)
        .api_err("Failed to create contact card")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(card))))
}

pub async fn update_contact_card(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ContactCardRequest>,
) -> impl IntoResponse {
    validate_required_text("title", &req.title)?;

    let card = ContactCard {
        id,
        title: req.title,
        details: req.details,
        sub_details: req.sub_details,
        contact_type: req.contact_type,
        icon_emoji: req.icon_emoji,
        display_order: req.display_order,
        is_active: req.is_active,
        created_at: Utc::now(), // not persisted on update
    };

    match state.store.update_contact_card(&card) {
        Ok(()) => Ok::<_, ApiError>(Json(ApiResponse::success(card))),
        Err(Error::NotFound) => Err(ApiError::not_found("Contact card not found")),
        Err(_) => Err(ApiError::internal("Failed to update contact card")),
    }
}

pub async fn delete_contact_card(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_contact_card(&id)
        .api_err("Failed to delete contact card")?;

    if !deleted {
        return Err(ApiError::not_found("Contact card not found"));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
