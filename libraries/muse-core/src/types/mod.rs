//! Domain types for Muse

mod ids;
mod song;
mod user;

pub use ids::SongId;
pub use song::{Song, SongInput};
pub use user::{NewUser, ProfileUpdate, User, UserProfile};
