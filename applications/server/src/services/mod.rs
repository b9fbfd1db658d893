/// Server services
pub mod auth;
pub mod catalog;
pub mod file_storage;

pub use auth::AuthService;
pub use catalog::{Catalog, CatalogCategory};
pub use file_storage::{FileStorage, MediaCategory};
