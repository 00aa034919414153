use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::{Map, Value};

use crate::media::HERO_GALLERY;
use crate::server::AppState;
use crate::server::dto::{HeroImageResponse, HomeContentResponse, HomeStatsResponse};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::settings::{
    SettingsNamespace, company_info_defaults, overlay_defaults,
};

fn stat_value(state: &AppState, key: &str, fallback: i64) -> Result<i64, ApiError> {
    let stored = state.store.get_setting(key).api_err("Failed to read stats")?;
    Ok(stored
        .and_then(|s| s.value.parse().ok())
        .unwrap_or(fallback))
}

/// Assembles the home page payload; shared by the public endpoint and the
/// admin editor view.
pub async fn build_home_content(state: &AppState) -> Result<HomeContentResponse, ApiError> {
    let description = state
        .store
        .get_setting("company_description")
        .api_err("Failed to read company description")?
        .map(|s| s.value)
        .unwrap_or_else(|| {
            "S-Steel Construction is a leading provider of steel construction services."
                .to_string()
        });

    let heroes = state
        .store
        .list_assets(HERO_GALLERY)
        .api_err("Failed to list hero images")?;

    let mut hero_images: Vec<HeroImageResponse> = heroes
        .into_iter()
        .enumerate()
        .map(|(i, asset)| HeroImageResponse {
            url: state.upload_url(&asset.relative_path),
            alt: asset
                .alt_text
                .unwrap_or_else(|| format!("Hero Image {}", i + 1)),
            filename: Some(asset.relative_path),
            id: asset.id,
        })
        .collect();

    // Placeholders keep the hero carousel populated before any upload
    if hero_images.is_empty() {
        hero_images = (1..=3)
            .map(|i| HeroImageResponse {
                id: i.to_string(),
                url: "/api/placeholder/800/600".to_string(),
                alt: format!("Construction Project {i}"),
                filename: None,
            })
            .collect();
    }

    Ok(HomeContentResponse {
        hero_images,
        company_description: description,
        stats: HomeStatsResponse {
            years_experience: stat_value(state, "years_experience", 15)?,
            projects_completed: stat_value(state, "projects_completed", 500)?,
            team_members: stat_value(state, "team_members", 50)?,
            client_satisfaction: stat_value(state, "client_satisfaction", 99)?,
        },
    })
}

pub async fn home_content(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let content = build_home_content(&state).await?;
    Ok::<_, ApiError>(Json(ApiResponse::success(content)))
}

/// Company and footer settings merged for the public site: company keys with
/// their prefix stripped, footer keys with the prefix kept, defaults filled
/// in for anything never stored.
pub async fn company_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut data = state
        .settings
        .namespace_values(SettingsNamespace::Company)
        .api_err("Failed to read company settings")?;

    let footer = state
        .settings
        .namespace_values(SettingsNamespace::Footer)
        .api_err("Failed to read footer settings")?;
    merge_footer(&mut data, footer);

    overlay_defaults(&mut data, company_info_defaults());

    Ok::<_, ApiError>(Json(ApiResponse::success(Value::Object(data))))
}

pub fn merge_footer(data: &mut Map<String, Value>, footer: Map<String, Value>) {
    for (key, value) in footer {
        data.insert(format!("footer_{key}"), value);
    }
}
