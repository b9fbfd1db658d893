/// User account domain types
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored user record, including the password hash
///
/// Never hand this to a client; project it into a [`UserProfile`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique login name
    pub username: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Date of birth
    pub dob: NaiveDate,

    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub banner: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub location: String,
}

impl User {
    /// Build a fresh record with empty profile fields
    pub fn new(new_user: NewUser) -> Self {
        Self {
            username: new_user.username,
            password_hash: new_user.password_hash,
            name: new_user.name,
            dob: new_user.dob,
            avatar: String::new(),
            banner: String::new(),
            bio: String::new(),
            location: String::new(),
        }
    }

    /// Overwrite all four mutable profile fields
    ///
    /// Fields missing from `update` become empty.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        self.avatar = update.avatar.unwrap_or_default();
        self.banner = update.banner.unwrap_or_default();
        self.bio = update.bio.unwrap_or_default();
        self.location = update.location.unwrap_or_default();
    }
}

/// Data needed to create a user; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub dob: NaiveDate,
}

/// Replacement values for the mutable profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub dob: NaiveDate,
    pub avatar: String,
    pub banner: String,
    pub bio: String,
    pub location: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            dob: user.dob,
            avatar: user.avatar.clone(),
            banner: user.banner.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            dob: user.dob,
            avatar: user.avatar,
            banner: user.banner,
            bio: user.bio,
            location: user.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(NewUser {
            username: "alice".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: "Alice".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        })
    }

    #[test]
    fn new_user_has_empty_profile_fields() {
        let user = sample_user();
        assert!(user.avatar.is_empty());
        assert!(user.banner.is_empty());
        assert!(user.bio.is_empty());
        assert!(user.location.is_empty());
    }

    #[test]
    fn apply_profile_overwrites_omitted_fields() {
        let mut user = sample_user();
        user.bio = "old bio".to_string();
        user.location = "Lisbon".to_string();

        user.apply_profile(ProfileUpdate {
            avatar: Some("/uploads/avatars/1-a.png".to_string()),
            ..ProfileUpdate::default()
        });

        assert_eq!(user.avatar, "/uploads/avatars/1-a.png");
        assert_eq!(user.bio, "");
        assert_eq!(user.location, "");
    }

    #[test]
    fn profile_projection_hides_password_hash() {
        let profile = UserProfile::from(&sample_user());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["dob"], "1990-05-17");
    }

    #[test]
    fn stored_record_without_profile_fields_loads() {
        let json = r#"{"username":"bob","password_hash":"h","name":"Bob","dob":"2001-01-02"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "bob");
        assert!(user.avatar.is_empty());
    }
}
