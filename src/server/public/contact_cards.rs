use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::dto::PublicContactCardResponse;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};

const DEFAULT_EMOJI: &str = "📞";
const DEFAULT_GRADIENT: &str = "from-blue-500 to-purple-600";

pub async fn list_contact_cards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cards = state
        .store
        .list_contact_cards(true)
        .api_err("Failed to list contact cards")?;

    let items: Vec<PublicContactCardResponse> = cards
        .into_iter()
        .map(|c| PublicContactCardResponse {
            id: c.id,
            title: c.title,
            details: c.details,
            sub_details: c.sub_details,
            emoji: c.icon_emoji.unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            gradient: DEFAULT_GRADIENT.to_string(),
            verified: true,
        })
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(items)))
}
