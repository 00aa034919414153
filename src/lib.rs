//! # Sitewright
//!
//! A content backend for small-business websites, usable both as a
//! standalone binary and as a library. It stores projects with image
//! galleries, a hero-image carousel, employees, contact inquiries, and
//! namespaced site settings, and serves them to a public site and an
//! authenticated admin panel.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! sitewright = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use sitewright::media::MediaStorage;
//! use sitewright::server::{AppState, create_router};
//! use sitewright::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/sitewright.db").unwrap();
//! store.initialize().unwrap();
//!
//! let media = MediaStorage::new(&PathBuf::from("./data"));
//! let state = Arc::new(AppState::new(Arc::new(store), media, None));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod media;
pub mod server;
pub mod settings;
pub mod store;
pub mod types;
