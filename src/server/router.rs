use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use super::admin::admin_router;
use super::public::public_router;
use crate::media::{Gallery, MediaStorage};
use crate::settings::Settings;
use crate::store::Store;

/// Request bodies (multipart uploads included) are capped at the upload
/// limit before any handler runs.
const MAX_BODY_BYTES: usize = crate::media::MAX_UPLOAD_BYTES;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub media: MediaStorage,
    pub settings: Settings,
    pub gallery: Gallery,
    /// Public base URL for external access, e.g. "https://example.com".
    /// Empty = relative upload URLs.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        media: MediaStorage,
        public_base_url: Option<String>,
    ) -> Self {
        let settings = Settings::new(store.clone());
        let gallery = Gallery::new(store.clone(), media.clone());
        Self {
            store,
            media,
            settings,
            gallery,
            public_base_url,
        }
    }

    /// Builds the URL a stored upload is served under.
    #[must_use]
    pub fn upload_url(&self, relative_path: &str) -> String {
        format!(
            "{}/uploads/{relative_path}",
            self.public_base_url.as_deref().unwrap_or("")
        )
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/admin", admin_router())
        .merge(public_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
