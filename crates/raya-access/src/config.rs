//! Registry configuration
//!
//! Resolves which registry an access command talks to and which token it
//! authenticates with. Resolution order for the registry URL:
//! `--registry` flag > `RAYA_REGISTRY` > project `raya.toml` >
//! `~/.raya/config.toml` > [`DEFAULT_REGISTRY`].

use crate::manifest::PackageManifest;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Default registry URL
pub const DEFAULT_REGISTRY: &str = "https://pkg.raya.dev/api/v1";

/// Environment variable overriding the registry URL
pub const REGISTRY_ENV: &str = "RAYA_REGISTRY";

/// Environment variable supplying an auth token
pub const TOKEN_ENV: &str = "RAYA_TOKEN";

/// Errors that can occur while loading registry configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Registry URL could not be parsed
    #[error("Invalid registry URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Failed to read a config file
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a config file
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Endpoint configuration passed into every registry call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Registry base URL (no trailing slash)
    pub registry: String,

    /// Bearer token, if logged in
    pub token: Option<String>,
}

impl RegistryOptions {
    /// Options for a registry URL without credentials
    pub fn new(registry: impl Into<String>) -> Self {
        let registry: String = registry.into();
        Self {
            registry: registry.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY)
    }
}

/// Where the registry URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySource {
    Flag,
    Env,
    Project,
    Global,
    Default,
}

/// Locations of the user-level config files (`~/.raya`)
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    config_dir: PathBuf,
}

impl RegistrySettings {
    /// Settings rooted at `~/.raya`
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".raya");
        Self { config_dir }
    }

    /// Settings rooted at an explicit directory
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// `credentials.toml`, as written by `raya pkg login`
    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// `config.toml`, as written by `raya pkg set-url --global`
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Resolve registry options from the process environment
    pub fn resolve(
        &self,
        flag: Option<&str>,
        project_dir: &Path,
    ) -> Result<RegistryOptions, ConfigError> {
        self.resolve_with(flag, project_dir, |key| std::env::var(key).ok())
    }

    /// Resolve registry options with an explicit environment lookup
    pub fn resolve_with<F>(
        &self,
        flag: Option<&str>,
        project_dir: &Path,
        env: F,
    ) -> Result<RegistryOptions, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (url, source) = self.resolve_registry(flag, project_dir, &env);
        Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
            url: url.clone(),
            source,
        })?;
        tracing::debug!(registry = %url, ?source, "resolved registry");

        let mut options = RegistryOptions::new(url);
        options.token = match env(TOKEN_ENV).filter(|t| !t.is_empty()) {
            Some(token) => Some(token),
            None => self.token_for(&options.registry)?,
        };
        Ok(options)
    }

    fn resolve_registry<F>(&self, flag: Option<&str>, project_dir: &Path, env: &F) -> (String, RegistrySource)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = flag {
            return (url.to_string(), RegistrySource::Flag);
        }

        if let Some(url) = env(REGISTRY_ENV).filter(|u| !u.is_empty()) {
            return (url, RegistrySource::Env);
        }

        if let Ok(manifest) = PackageManifest::from_dir(project_dir) {
            if let Some(reg) = manifest.registry {
                return (reg.url, RegistrySource::Project);
            }
        }

        if let Some(url) = self.read_global_registry() {
            return (url, RegistrySource::Global);
        }

        (DEFAULT_REGISTRY.to_string(), RegistrySource::Default)
    }

    fn read_global_registry(&self) -> Option<String> {
        let path = self.global_config_path();
        let content = std::fs::read_to_string(&path).ok()?;
        let parsed: toml::Value = match toml::from_str(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable global config");
                return None;
            }
        };
        parsed.get("registry")?.get("url")?.as_str().map(|s| s.to_string())
    }

    /// Credentials entry (`[registries."<url>"]`) for a registry, if any
    pub fn credentials_entry(&self, registry: &str) -> Result<Option<toml::Value>, ConfigError> {
        let path = self.credentials_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let creds: toml::Value =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;

        let Some(registries) = creds.get("registries").and_then(|r| r.as_table()) else {
            return Ok(None);
        };

        let trimmed = registry.trim_end_matches('/');
        let entry = registries.get(registry).or_else(|| {
            registries
                .iter()
                .find(|(url, _)| url.trim_end_matches('/') == trimmed)
                .map(|(_, entry)| entry)
        });
        Ok(entry.cloned())
    }

    /// Stored token for a registry
    pub fn token_for(&self, registry: &str) -> Result<Option<String>, ConfigError> {
        let entry = self.credentials_entry(registry)?;
        Ok(entry
            .as_ref()
            .and_then(|e| e.get("token"))
            .and_then(|t| t.as_str())
            .map(|t| t.to_string()))
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::new()
    }
}
