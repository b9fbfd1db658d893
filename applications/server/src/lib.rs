//! Muse Server Library
//!
//! REST backend for a music-discovery and social-profile web app: static
//! catalog data, user accounts, a playlist of songs and image uploads.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use app::{build_state, create_router};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, Catalog, CatalogCategory, FileStorage, MediaCategory};
pub use state::AppState;
