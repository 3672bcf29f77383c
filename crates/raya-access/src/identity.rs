//! Caller identity
//!
//! `ls-packages` without an entity lists the caller's own packages. The
//! caller is whoever `raya pkg login` stored credentials for.

use crate::config::{ConfigError, RegistrySettings};
use thiserror::Error;

/// Errors that can occur while resolving the caller's identity
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No credentials stored for the registry
    #[error("Not logged in to {0}. Run `raya pkg login` to authenticate.")]
    NotLoggedIn(String),

    /// Credentials file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Resolves the identity of the current user
pub trait IdentityResolver {
    fn self_identity(&self) -> Result<String, IdentityError>;
}

/// Reads the user name stored alongside a registry's credentials
#[derive(Debug, Clone)]
pub struct CredentialsIdentity {
    settings: RegistrySettings,
    registry: String,
}

impl CredentialsIdentity {
    pub fn new(settings: RegistrySettings, registry: impl Into<String>) -> Self {
        Self {
            settings,
            registry: registry.into(),
        }
    }
}

impl IdentityResolver for CredentialsIdentity {
    fn self_identity(&self) -> Result<String, IdentityError> {
        let entry = self.settings.credentials_entry(&self.registry)?;
        entry
            .as_ref()
            .and_then(|e| e.get("user"))
            .and_then(|u| u.as_str())
            .filter(|u| !u.is_empty())
            .map(|u| u.to_string())
            .ok_or_else(|| IdentityError::NotLoggedIn(self.registry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_from_credentials() {
        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join("credentials.toml"),
            "[registries.\"https://registry.example.com\"]\ntoken = \"t\"\nuser = \"alice\"\n",
        )
        .unwrap();

        let identity = CredentialsIdentity::new(
            RegistrySettings::with_config_dir(home.path()),
            "https://registry.example.com",
        );
        assert_eq!(identity.self_identity().unwrap(), "alice");
    }

    #[test]
    fn test_not_logged_in_without_file() {
        let home = TempDir::new().unwrap();
        let identity = CredentialsIdentity::new(
            RegistrySettings::with_config_dir(home.path()),
            "https://registry.example.com",
        );
        let err = identity.self_identity().unwrap_err();
        assert!(matches!(err, IdentityError::NotLoggedIn(ref r) if r == "https://registry.example.com"));
    }

    #[test]
    fn test_token_without_user_is_not_logged_in() {
        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join("credentials.toml"),
            "[registries.\"https://registry.example.com\"]\ntoken = \"t\"\n",
        )
        .unwrap();

        let identity = CredentialsIdentity::new(
            RegistrySettings::with_config_dir(home.path()),
            "https://registry.example.com",
        );
        assert!(matches!(
            identity.self_identity(),
            Err(IdentityError::NotLoggedIn(_))
        ));
    }
}
