mod contact_cards;
mod contacts;
mod employees;
mod hero;
mod images;
mod projects;
mod settings;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::media::{MAX_UPLOAD_BYTES, UploadFile};
use crate::server::AppState;
use crate::server::response::ApiError;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        // Project routes
        .route("/projects", post(projects::create_project))
        .route("/projects/{id}", put(projects::update_project))
        .route("/projects/{id}", delete(projects::delete_project))
        // Project image routes
        .route("/projects/{id}/upload", post(images::upload_images))
        .route("/projects/{id}/images", get(images::list_images))
        .route(
            "/projects/{id}/images/{image_id}",
            delete(images::delete_image),
        )
        .route(
            "/projects/{id}/images/{image_id}/main",
            put(images::set_main_image),
        )
        // Contact routes
        .route("/contacts", get(contacts::list_contacts))
        // Home content routes
        .route("/home-content", get(settings::home_content))
        .route(
            "/home-content/description",
            put(settings::update_description),
        )
        .route("/home-content/stats", put(settings::update_stats))
        .route("/home-content/images", post(hero::upload_hero_images))
        .route(
            "/home-content/images/{image_id}",
            delete(hero::delete_hero_image),
        )
        // Employee routes
        .route("/employees", get(employees::list_employees))
        .route("/employees", post(employees::create_employee))
        .route("/employees/{id}", put(employees::update_employee))
        .route("/employees/{id}", delete(employees::delete_employee))
        // Contact card routes
        .route("/contact-cards", get(contact_cards::list_contact_cards))
        .route("/contact-cards", post(contact_cards::create_contact_card))
        .route(
            "/contact-cards/{id}",
            put(contact_cards::update_contact_card),
        )
        .route(
            "/contact-cards/{id}",
            delete(contact_cards::delete_contact_card),
        )
        // Settings routes
        .route("/company-settings", get(settings::company_settings))
        .route("/company-settings", put(settings::update_company_settings))
        .route("/dashboard-settings", get(settings::dashboard_settings))
        .route(
            "/dashboard-settings",
            put(settings::update_dashboard_settings),
        )
}

/// Drains a multipart request into upload files plus the `is_main` form
/// field. Any of `file_fields` is accepted as a file part name.
async fn parse_upload_multipart(
    multipart: &mut axum::extract::Multipart,
    file_fields: &[&str],
) -> Result<(Vec<UploadFile>, bool), ApiError> {
    let mut files = Vec::new();
    let mut is_main = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
    {
        match field.name() {
            Some(name) if file_fields.contains(&name) => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;
                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::payload_too_large(format!(
                        "File size ({} bytes) exceeds maximum allowed size ({MAX_UPLOAD_BYTES} bytes)",
                        data.len()
                    )));
                }
                if filename.is_empty() {
                    continue;
                }
                files.push(UploadFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            Some("is_main") => {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read is_main: {e}"))
                })?;
                is_main = value.to_lowercase() == "true";
            }
            _ => {}
        }
    }

    Ok((files, is_main))
}
