/// Account service - signup, login and password handling
use crate::error::{Result, ServerError};
use muse_core::{validation, NewUser, User, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Validate and create a new account
    ///
    /// The username is checked for uniqueness by the store, under its write
    /// lock, so two racing signups for the same name admit exactly one.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
        dob: &str,
    ) -> Result<User> {
        validation::validate_credentials(username, password)?;
        validation::validate_name(name)?;
        let dob = validation::parse_dob(dob)?;

        let password_hash = self.hash_blocking(password.to_string()).await?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                name: name.to_string(),
                dob,
            })
            .await?;

        tracing::info!("Created user {}", user.username);
        Ok(user)
    }

    /// Check a username/password pair and return the matching account
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        validation::validate_credentials(username, password)?;

        let Some(user) = self.users.find(username).await? else {
            tracing::debug!("Login attempt for unknown user {}", username);
            return Err(ServerError::InvalidCredentials);
        };

        let verified = self
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;

        if !verified {
            tracing::debug!("Password mismatch for user {}", username);
            return Err(ServerError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn hash_blocking(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(ServerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;
    use muse_storage::JsonUserStore;

    fn auth_with_store(dir: &tempfile::TempDir) -> AuthService {
        let users: Arc<dyn UserStore> =
            Arc::new(JsonUserStore::new(dir.path().join("users.json")));
        AuthService::new(users, MIN_BCRYPT_COST)
    }

    #[test]
    fn test_password_hashing() {
        let dir = tempfile::tempdir().unwrap();
        let auth = auth_with_store(&dir);
        let password = "my_secure_password";

        let hash = auth.hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(auth.verify_password(password, &hash).unwrap());
        assert!(!auth.verify_password("wrong_password", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_password() {
        let dir = tempfile::tempdir().unwrap();
        let auth = auth_with_store(&dir);

        let user = auth
            .signup("alice", "secret1", "Alice", "1990-05-17")
            .await
            .unwrap();

        assert_ne!(user.password_hash, "secret1");
        let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        assert!(!raw.contains("secret1"));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let auth = auth_with_store(&dir);
        auth.signup("alice", "secret1", "Alice", "1990-05-17")
            .await
            .unwrap();

        let user = auth.authenticate("alice", "secret1").await.unwrap();
        assert_eq!(user.username, "alice");

        assert!(matches!(
            auth.authenticate("alice", "wrong-pass").await,
            Err(ServerError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.authenticate("nobody", "secret1").await,
            Err(ServerError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_validates_shape_first() {
        let dir = tempfile::tempdir().unwrap();
        let auth = auth_with_store(&dir);

        assert!(matches!(
            auth.authenticate("al", "secret1").await,
            Err(ServerError::BadRequest(_))
        ));
        assert!(matches!(
            auth.authenticate("alice", "abc").await,
            Err(ServerError::BadRequest(_))
        ));
    }
}
