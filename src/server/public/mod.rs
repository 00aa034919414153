mod contact;
mod contact_cards;
mod employees;
pub(crate) mod home;
mod projects;
mod uploads;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/home-content", get(home::home_content))
        .route("/api/company-info", get(home::company_info))
        .route("/api/employees", get(employees::list_employees))
        .route("/api/contact-cards", get(contact_cards::list_contact_cards))
        .route(
            "/api/placeholder/{width}/{height}",
            get(uploads::placeholder),
        )
        .route("/uploads/{*path}", get(uploads::serve_upload))
}
