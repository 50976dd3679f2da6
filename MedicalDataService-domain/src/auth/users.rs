//! Static user registry for HTTP Basic authentication
//!
//! Users are configured through the `APP_USERS` environment variable as a
//! JSON array of `{username, password, roles}` objects. The registry is
//! built once at process start and is immutable afterwards; plaintext
//! passwords from the configuration are bcrypt-hashed during loading and
//! never kept around.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Environment variable holding the user configuration JSON
pub const APP_USERS_ENV: &str = "APP_USERS";

/// Errors raised while loading the user registry
#[derive(Debug, Error)]
pub enum UserRegistryError {
    /// The configuration variable is missing entirely
    #[error("No users configured: environment variable {APP_USERS_ENV} is not set")]
    MissingConfig,

    /// The configuration could not be parsed as a JSON user array
    #[error("Invalid user configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A configured password could not be hashed
    #[error("Failed to hash configured password for user '{0}'")]
    HashingFailed(String),
}

/// A user as supplied in the configuration JSON, password still in plaintext
#[derive(Debug, Deserialize)]
struct ConfiguredUser {
    username: String,
    password: String,
    #[serde(default)]
    roles: Vec<String>,
}

/// An authenticated application user with a hashed password
#[derive(Debug, Clone)]
pub struct ApplicationUser {
    /// Login name, unique within the registry
    pub username: String,
    /// bcrypt hash of the configured password
    pub password_hash: String,
    /// Roles granted to the user
    pub roles: Vec<String>,
}

/// Immutable collection of application users, loaded once at startup
#[derive(Debug)]
pub struct UserRegistry {
    users: Vec<ApplicationUser>,
}

impl UserRegistry {
    /// Load the registry from the `APP_USERS` environment variable
    ///
    /// Absence of the variable is an error: the service must not start
    /// without a configured user list.
    pub fn from_env() -> Result<Self, UserRegistryError> {
        let users_json = std::env::var(APP_USERS_ENV).map_err(|_| UserRegistryError::MissingConfig)?;
        Self::from_json(&users_json)
    }

    /// Build the registry from a JSON array of configured users
    pub fn from_json(users_json: &str) -> Result<Self, UserRegistryError> {
        let configured: Vec<ConfiguredUser> = serde_json::from_str(users_json)?;

        let mut users = Vec::with_capacity(configured.len());
        for user in configured {
            let password_hash = bcrypt::hash(&user.password, bcrypt::DEFAULT_COST)
                .map_err(|_| UserRegistryError::HashingFailed(user.username.clone()))?;

            users.push(ApplicationUser {
                username: user.username,
                password_hash,
                roles: user.roles,
            });
        }

        info!("Loaded {} user(s) into the authentication registry", users.len());

        Ok(Self { users })
    }

    /// Number of configured users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry holds no users at all
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a user by username
    pub fn find_user(&self, username: &str) -> Option<&ApplicationUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Verify a username/password pair against the registry
    ///
    /// Returns the matching user when the credentials are valid. bcrypt
    /// verification runs on the blocking pool so the request task is not
    /// held up by the hash work.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Option<ApplicationUser> {
        let user = match self.find_user(username) {
            Some(user) => user.clone(),
            None => {
                debug!("Unknown username presented for authentication: {}", username);
                return None;
            }
        };

        let password = password.to_string();
        let password_hash = user.password_hash.clone();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash)).await;

        match verified {
            Ok(Ok(true)) => Some(user),
            Ok(Ok(false)) => {
                debug!("Password mismatch for user: {}", username);
                None
            }
            Ok(Err(e)) => {
                error!("bcrypt verification failed for user {}: {}", username, e);
                None
            }
            Err(e) => {
                error!("bcrypt verification task failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_JSON: &str = r#"[
        {"username": "alice", "password": "wonderland", "roles": ["USER"]},
        {"username": "bob", "password": "builder", "roles": ["ADMIN"]}
    ]"#;

    #[test]
    fn test_from_json_hashes_passwords() {
        let registry = UserRegistry::from_json(USERS_JSON).unwrap();

        assert_eq!(registry.len(), 2);
        let alice = registry.find_user("alice").unwrap();
        assert_ne!(alice.password_hash, "wonderland");
        assert!(alice.password_hash.starts_with("$2"));
        assert_eq!(alice.roles, vec!["USER".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let result = UserRegistry::from_json("not json");
        assert!(matches!(result, Err(UserRegistryError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_defaults_missing_roles() {
        let registry =
            UserRegistry::from_json(r#"[{"username": "carol", "password": "pw"}]"#).unwrap();
        assert!(registry.find_user("carol").unwrap().roles.is_empty());
    }

    #[test]
    fn test_find_user_unknown() {
        let registry = UserRegistry::from_json(USERS_JSON).unwrap();
        assert!(registry.find_user("mallory").is_none());
    }

    #[tokio::test]
    async fn test_verify_credentials_valid() {
        let registry = UserRegistry::from_json(USERS_JSON).unwrap();

        let user = registry.verify_credentials("alice", "wonderland").await;
        assert_eq!(user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let registry = UserRegistry::from_json(USERS_JSON).unwrap();

        assert!(registry.verify_credentials("alice", "builder").await.is_none());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_user() {
        let registry = UserRegistry::from_json(USERS_JSON).unwrap();

        assert!(registry.verify_credentials("mallory", "whatever").await.is_none());
    }
}
