//! Input shape rules
//!
//! Every check runs before a store is touched, so a failure here never has a
//! side effect. Lengths are counted in characters, not bytes.

use crate::error::{MuseError, Result};
use crate::types::SongInput;
use chrono::NaiveDate;

pub const USERNAME_LEN: (usize, usize) = (3, 30);
pub const PASSWORD_LEN: (usize, usize) = (4, 50);
pub const NAME_LEN: (usize, usize) = (1, 100);
pub const SONG_TITLE_LEN: (usize, usize) = (3, 50);
pub const SONG_ARTIST_LEN: (usize, usize) = (3, 50);
pub const SONG_ALBUM_MAX: usize = 100;
pub const SONG_IMAGE_MAX: usize = 500;

fn check_len(field: &str, value: &str, (min, max): (usize, usize)) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(MuseError::invalid_input(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

fn check_max(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(MuseError::invalid_input(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Username and password shape, shared by signup and login
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    check_len("username", username, USERNAME_LEN)?;
    check_len("password", password, PASSWORD_LEN)
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MuseError::invalid_input("name is required"));
    }
    check_len("name", name, NAME_LEN)
}

/// Parse a `YYYY-MM-DD` date of birth
pub fn parse_dob(dob: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .map_err(|_| MuseError::invalid_input("dob must be a date in YYYY-MM-DD format"))
}

pub fn validate_song(input: &SongInput) -> Result<()> {
    check_len("title", &input.title, SONG_TITLE_LEN)?;
    check_len("artist", &input.artist, SONG_ARTIST_LEN)?;
    if let Some(album) = &input.album {
        check_max("album", album, SONG_ALBUM_MAX)?;
    }
    if let Some(image) = &input.image {
        check_max("image", image, SONG_IMAGE_MAX)?;
    }
    Ok(())
}
