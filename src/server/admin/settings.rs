use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::{Map, Value};

use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::{UpdateDescriptionRequest, UpdateStatsRequest};
use crate::server::public::home::{build_home_content, merge_footer};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::settings::{
    SettingsNamespace, company_settings_defaults, dashboard_defaults, encode_value,
    overlay_defaults,
};

pub async fn home_content(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let content = build_home_content(&state).await?;
    Ok::<_, ApiError>(Json(ApiResponse::success(content)))
}

pub async fn update_description(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateDescriptionRequest>,
) -> impl IntoResponse {
    state
        .store
        .upsert_setting("company_description", &req.description)
        .api_err("Failed to update company description")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(
        "Company description updated successfully".to_string(),
    )))
}

pub async fn update_stats(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateStatsRequest>,
) -> impl IntoResponse {
    let stats = [
        ("years_experience", req.years_experience),
        ("projects_completed", req.projects_completed),
        ("team_members", req.team_members),
        ("client_satisfaction", req.client_satisfaction),
    ];

    for (key, value) in stats {
        let Some(value) = value else { continue };
        let encoded = encode_value(&value);
        if encoded.is_empty() {
            continue;
        }
        state
            .store
            .upsert_setting(key, &encoded)
            .api_err("Failed to update statistics")?;
    }

    Ok::<_, ApiError>(Json(ApiResponse::success(
        "Statistics updated successfully".to_string(),
    )))
}

/// Company + footer settings with the admin defaults overlaid.
pub async fn company_settings(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut data = state
        .settings
        .namespace_values(SettingsNamespace::Company)
        .api_err("Failed to read company settings")?;

    let footer = state
        .settings
        .namespace_values(SettingsNamespace::Footer)
        .api_err("Failed to read footer settings")?;
    merge_footer(&mut data, footer);

    overlay_defaults(&mut data, company_settings_defaults());

    Ok::<_, ApiError>(Json(ApiResponse::success(Value::Object(data))))
}

pub async fn update_company_settings(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(values): Json<Map<String, Value>>,
) -> impl IntoResponse {
    match state.settings.set_many(SettingsNamespace::Company, &values) {
        Ok(()) => Ok::<_, ApiError>(Json(ApiResponse::success(
            "Company settings updated successfully".to_string(),
        ))),
        Err(Error::InvalidArgument(_)) => Err(ApiError::bad_request("No data provided")),
        Err(_) => Err(ApiError::internal("Failed to update company settings")),
    }
}

pub async fn dashboard_settings(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let data = state
        .settings
        .with_defaults(SettingsNamespace::Dashboard, dashboard_defaults())
        .api_err("Failed to read dashboard settings")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(Value::Object(data))))
}

pub async fn update_dashboard_settings(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(values): Json<Map<String, Value>>,
) -> impl IntoResponse {
    match state
        .settings
        .set_many(SettingsNamespace::Dashboard, &values)
    {
        Ok(()) => Ok::<_, ApiError>(Json(ApiResponse::success(
            "Dashboard settings updated successfully".to_string(),
        ))),
        Err(Error::InvalidArgument(_)) => Err(ApiError::bad_request("No data provided")),
        Err(_) => Err(ApiError::internal("Failed to update dashboard settings")),
    }
}
