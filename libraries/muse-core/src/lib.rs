//! Muse Core
//!
//! Domain types, store traits, input validation and error handling shared by
//! the Muse storage layer and server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserProfile`, `Song`, `SongId`
//! - **Store Traits**: `UserStore`, `SongStore`
//! - **Validation**: length and shape rules applied before any store mutation
//! - **Error Handling**: Unified `MuseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use muse_core::types::SongInput;
//! use muse_core::validation;
//!
//! let input = SongInput {
//!     title: "Song A".to_string(),
//!     artist: "Artist A".to_string(),
//!     album: None,
//!     image: None,
//! };
//! assert!(validation::validate_song(&input).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{MuseError, Result};
pub use storage::{SongStore, UserStore};

pub use types::{NewUser, ProfileUpdate, Song, SongId, SongInput, User, UserProfile};
